//! Read-only connections for file-backed databases, handed out round-robin.
//! Under WAL a reader sees the last committed state and never waits on the
//! writer.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};

use libris_core::errors::{LibrisResult, StorageError};

use super::functions::register_functions;
use super::pragmas::apply_read_pragmas;
use crate::to_storage_err;

/// Upper bound on `storage.read_pool_size`.
const MAX_READERS: usize = 8;

pub struct ReadPool {
    readers: Vec<Mutex<Connection>>,
    cursor: AtomicUsize,
}

fn open_reader(path: &Path, busy_timeout_ms: u32) -> LibrisResult<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags)
        .map_err(|e| to_storage_err(format!("open reader {}: {e}", path.display())))?;
    apply_read_pragmas(&conn, busy_timeout_ms)?;
    register_functions(&conn)?;
    Ok(conn)
}

impl ReadPool {
    /// Open `size` readers (clamped to `1..=8`) on an existing database file.
    pub fn open(path: &Path, size: usize, busy_timeout_ms: u32) -> LibrisResult<Self> {
        let readers = (0..size.clamp(1, MAX_READERS))
            .map(|_| open_reader(path, busy_timeout_ms).map(Mutex::new))
            .collect::<LibrisResult<Vec<_>>>()?;
        Ok(Self {
            readers,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Run `f` on the next reader in turn.
    pub fn with_conn<F, T>(&self, f: F) -> LibrisResult<T>
    where
        F: FnOnce(&Connection) -> LibrisResult<T>,
    {
        let slot = self.cursor.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let conn = self.readers[slot]
            .lock()
            .map_err(|e| StorageError::LockPoisoned {
                message: format!("reader {slot}: {e}"),
            })?;
        f(&conn)
    }

    pub fn size(&self) -> usize {
        self.readers.len()
    }
}
