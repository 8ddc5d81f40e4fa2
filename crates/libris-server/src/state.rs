//! Shared application state handed to every handler.

use std::sync::Arc;

use libris_core::errors::LibrisResult;
use libris_core::LibrisConfig;
use libris_storage::StorageEngine;

use crate::error::WebError;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<StorageEngine>,
    pub config: Arc<LibrisConfig>,
}

impl AppState {
    pub fn new(storage: StorageEngine, config: LibrisConfig) -> Self {
        Self {
            storage: Arc::new(storage),
            config: Arc::new(config),
        }
    }

    /// Run a storage operation on the blocking pool.
    ///
    /// The engine's writer takes a blocking lock, so it must never be touched
    /// from an async task directly.
    pub async fn blocking<F, T>(&self, f: F) -> Result<T, WebError>
    where
        F: FnOnce(&StorageEngine) -> LibrisResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let storage = Arc::clone(&self.storage);
        tokio::task::spawn_blocking(move || f(&storage))
            .await
            .map_err(|e| WebError::Internal(format!("blocking task failed: {e}")))?
            .map_err(WebError::from)
    }
}
