use super::error_code::LibrisErrorCode;
use super::{AuthError, ConfigError, StorageError, ValidationError};

/// Top-level error aggregating every subsystem error via `From`.
#[derive(Debug, thiserror::Error)]
pub enum LibrisError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type LibrisResult<T> = Result<T, LibrisError>;

impl LibrisErrorCode for LibrisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Storage(e) => e.error_code(),
            Self::Validation(e) => e.error_code(),
            Self::Auth(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
