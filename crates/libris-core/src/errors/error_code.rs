//! Stable error codes shared by logs and HTTP error bodies.

/// Every error enum implements this to expose a stable code string.
pub trait LibrisErrorCode {
    /// Returns the error code string (e.g., "STORAGE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const CONSTRAINT_VIOLATION: &str = "CONSTRAINT_VIOLATION";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const AUTH_ERROR: &str = "AUTH_ERROR";
pub const FORBIDDEN: &str = "FORBIDDEN";
pub const CSRF_MISMATCH: &str = "CSRF_MISMATCH";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
