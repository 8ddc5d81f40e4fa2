use super::error_code::{self, LibrisErrorCode};

/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("constraint violation: {message}")]
    ConstraintViolation { message: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("connection lock poisoned: {message}")]
    LockPoisoned { message: String },
}

impl StorageError {
    /// True when the error came from a UNIQUE / CHECK / FOREIGN KEY constraint.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation { .. })
    }
}

impl LibrisErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::ConstraintViolation { .. } => error_code::CONSTRAINT_VIOLATION,
            Self::NotFound { .. } => error_code::NOT_FOUND,
            Self::SqliteError { .. } | Self::LockPoisoned { .. } => error_code::STORAGE_ERROR,
        }
    }
}
