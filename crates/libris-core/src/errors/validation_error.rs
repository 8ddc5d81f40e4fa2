use super::error_code::{self, LibrisErrorCode};

/// Input validation failures for form fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max} characters")]
    Length {
        field: &'static str,
        min: usize,
        max: usize,
    },

    #[error("Passwords must match")]
    PasswordMismatch,

    #[error("unknown genre: {0}")]
    UnknownGenre(String),

    #[error("invalid date {value:?}: expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("rating must be between {min} and {max}, got {value}")]
    RatingOutOfRange { value: i64, min: u8, max: u8 },

    #[error("invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

impl LibrisErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        error_code::VALIDATION_ERROR
    }
}
