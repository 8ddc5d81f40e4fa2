//! HTTP error type. Maps domain errors onto status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::Serialize;

use libris_core::errors::{
    error_code, AuthError, LibrisError, LibrisErrorCode, StorageError, ValidationError,
};

#[derive(Debug)]
pub enum WebError {
    NotFound(String),
    /// Request rejected outright: hard input limits, ownership, CSRF.
    Forbidden(String),
    /// Anonymous access to a login-only route; `next` is the path to return to.
    LoginRequired { next: String },
    Libris(LibrisError),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl From<LibrisError> for WebError {
    fn from(err: LibrisError) -> Self {
        Self::Libris(err)
    }
}

impl From<ValidationError> for WebError {
    fn from(err: ValidationError) -> Self {
        Self::Libris(err.into())
    }
}

impl From<AuthError> for WebError {
    fn from(err: AuthError) -> Self {
        Self::Libris(err.into())
    }
}

fn body(status: StatusCode, code: &'static str, message: String) -> Response {
    (status, Json(ErrorBody { error: code, message })).into_response()
}

fn internal(detail: &str) -> Response {
    tracing::error!(detail = %detail, "request failed");
    body(
        StatusCode::INTERNAL_SERVER_ERROR,
        error_code::STORAGE_ERROR,
        "internal server error".to_string(),
    )
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(message) => body(StatusCode::NOT_FOUND, error_code::NOT_FOUND, message),
            Self::Forbidden(message) => body(StatusCode::FORBIDDEN, error_code::FORBIDDEN, message),
            Self::LoginRequired { next } => {
                let next: String = form_urlencoded::byte_serialize(next.as_bytes()).collect();
                Redirect::to(&format!("/login?next={next}")).into_response()
            }
            Self::Internal(detail) => internal(&detail),
            Self::Libris(err) => {
                let code = err.error_code();
                match err {
                    LibrisError::Storage(StorageError::NotFound { .. }) => {
                        body(StatusCode::NOT_FOUND, code, err.to_string())
                    }
                    LibrisError::Auth(AuthError::CsrfMismatch) => {
                        body(StatusCode::FORBIDDEN, code, err.to_string())
                    }
                    LibrisError::Auth(
                        AuthError::InvalidCredentials | AuthError::UsernameTaken,
                    )
                    | LibrisError::Validation(_) => {
                        body(StatusCode::UNPROCESSABLE_ENTITY, code, err.to_string())
                    }
                    other => internal(&other.coded_string()),
                }
            }
        }
    }
}
