//! Single write connection behind `tokio::sync::Mutex`.
//! Serialized writes, no contention between writers.

use std::path::Path;

use rusqlite::Connection;
use tokio::sync::Mutex;

use libris_core::config::defaults::DEFAULT_BUSY_TIMEOUT_MS;
use libris_core::errors::LibrisResult;

use super::functions::register_functions;
use super::pragmas::{apply_pragmas, verify_wal_mode};
use crate::to_storage_err;

/// A single write connection protected by an async mutex.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open a new write connection to the given database path.
    pub fn open(path: &Path, busy_timeout_ms: u32) -> LibrisResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, busy_timeout_ms)?;
        if !verify_wal_mode(&conn)? {
            tracing::warn!(path = %path.display(), "WAL unavailable; readers will contend with the writer");
        }
        register_functions(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> LibrisResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, DEFAULT_BUSY_TIMEOUT_MS)?;
        register_functions(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` with the connection from a blocking context (startup,
    /// `spawn_blocking`). Must not be called from inside an async task.
    pub fn with_conn_sync<F, T>(&self, f: F) -> LibrisResult<T>
    where
        F: FnOnce(&Connection) -> LibrisResult<T>,
    {
        let guard = self.conn.blocking_lock();
        f(&guard)
    }
}
