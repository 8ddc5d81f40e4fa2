use super::error_code::{self, LibrisErrorCode};

/// Authentication and authorization failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Username or password incorrect")]
    InvalidCredentials,

    #[error("Username taken")]
    UsernameTaken,

    #[error("CSRF token missing or invalid")]
    CsrfMismatch,

    #[error("password hashing failed: {0}")]
    Hashing(String),
}

impl LibrisErrorCode for AuthError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::CsrfMismatch => error_code::CSRF_MISMATCH,
            _ => error_code::AUTH_ERROR,
        }
    }
}
