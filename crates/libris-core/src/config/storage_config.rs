use serde::{Deserialize, Serialize};

use super::defaults;

/// Storage subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    pub db_path: Option<String>,
    /// Number of read connections in the pool.
    pub read_pool_size: Option<usize>,
    /// Busy timeout in milliseconds.
    pub busy_timeout_ms: Option<u32>,
}

impl StorageConfig {
    pub fn effective_db_path(&self) -> &str {
        self.db_path
            .as_deref()
            .unwrap_or(defaults::DEFAULT_DB_FILENAME)
    }

    pub fn effective_read_pool_size(&self) -> usize {
        self.read_pool_size
            .unwrap_or(defaults::DEFAULT_READ_POOL_SIZE)
    }

    pub fn effective_busy_timeout_ms(&self) -> u32 {
        self.busy_timeout_ms
            .unwrap_or(defaults::DEFAULT_BUSY_TIMEOUT_MS)
    }
}
