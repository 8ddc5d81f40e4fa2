//! Tests for the error hierarchy.

use libris_core::errors::*;

#[test]
fn every_error_has_a_code() {
    let errors: Vec<LibrisError> = vec![
        StorageError::SqliteError { message: "x".into() }.into(),
        ValidationError::PasswordMismatch.into(),
        AuthError::CsrfMismatch.into(),
        ConfigError::FileNotFound { path: "/tmp".into() }.into(),
    ];
    for err in errors {
        assert!(!err.error_code().is_empty());
        assert!(err.coded_string().starts_with('['));
    }
}

#[test]
fn codes_pass_through_the_aggregate() {
    let err: LibrisError = StorageError::ConstraintViolation {
        message: "UNIQUE constraint failed: users.username".into(),
    }
    .into();
    assert_eq!(err.error_code(), error_code::CONSTRAINT_VIOLATION);

    let err: LibrisError = AuthError::CsrfMismatch.into();
    assert_eq!(err.error_code(), error_code::CSRF_MISMATCH);
    let err: LibrisError = AuthError::UsernameTaken.into();
    assert_eq!(err.error_code(), error_code::AUTH_ERROR);
}

#[test]
fn user_facing_messages_match_form_errors() {
    assert_eq!(ValidationError::PasswordMismatch.to_string(), "Passwords must match");
    assert_eq!(AuthError::UsernameTaken.to_string(), "Username taken");
    assert_eq!(
        AuthError::InvalidCredentials.to_string(),
        "Username or password incorrect"
    );
}
