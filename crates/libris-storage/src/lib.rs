//! # libris-storage
//!
//! SQLite persistence for the Libris catalog: single-writer / read-pool
//! connection layout, `user_version` migrations, parameterised queries for
//! users, books, attributes, reviews and sessions, and bulk seeding.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;
pub mod seed;

pub use engine::StorageEngine;
pub use seed::{SeedPlan, SeedReport};

use libris_core::errors::{LibrisError, StorageError};

/// Wrap a message as a generic storage error.
pub(crate) fn to_storage_err(message: impl Into<String>) -> LibrisError {
    LibrisError::Storage(StorageError::SqliteError {
        message: message.into(),
    })
}

/// Map a rusqlite error, keeping constraint violations distinguishable.
pub(crate) fn sqlite_err(e: rusqlite::Error) -> LibrisError {
    if let rusqlite::Error::SqliteFailure(ref failure, ref message) = e {
        if failure.code == rusqlite::ErrorCode::ConstraintViolation {
            return LibrisError::Storage(StorageError::ConstraintViolation {
                message: message.clone().unwrap_or_else(|| failure.to_string()),
            });
        }
    }
    to_storage_err(e.to_string())
}
