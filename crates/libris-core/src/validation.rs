//! Form field validation shared by the HTTP handlers.
//!
//! Lengths are counted in characters, not bytes.

use chrono::NaiveDate;

use crate::constants::{
    AUTHOR_MAX_LEN, GENRES, PASSWORD_MAX_LEN, PASSWORD_MIN_LEN, RATING_MAX, RATING_MIN,
    REVIEW_COMMENT_MAX_LEN, TITLE_MAX_LEN, USERNAME_MAX_LEN, USERNAME_MIN_LEN,
};
use crate::errors::ValidationError;
use crate::models::ReviewDraft;

fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ValidationError::Length { field, min, max });
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    check_length("username", username, USERNAME_MIN_LEN, USERNAME_MAX_LEN)
}

/// Confirmation mismatch is checked before length, so the form can be
/// re-rendered with "Passwords must match".
pub fn validate_new_password(password1: &str, password2: &str) -> Result<(), ValidationError> {
    if password1 != password2 {
        return Err(ValidationError::PasswordMismatch);
    }
    check_length("password", password1, PASSWORD_MIN_LEN, PASSWORD_MAX_LEN)
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    check_length("title", title, 1, TITLE_MAX_LEN)
}

pub fn validate_author(author: &str) -> Result<(), ValidationError> {
    check_length("author", author, 1, AUTHOR_MAX_LEN)
}

/// Empty input means "no date". Anything else must be `YYYY-MM-DD`.
pub fn normalize_publication_date(raw: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| Some(date.format("%Y-%m-%d").to_string()))
        .map_err(|_| ValidationError::InvalidDate {
            value: value.to_string(),
        })
}

/// Every genre must be a known one; duplicates collapse, first occurrence wins.
pub fn normalize_genres(raw: &[String]) -> Result<Vec<String>, ValidationError> {
    let mut genres: Vec<String> = Vec::with_capacity(raw.len());
    for genre in raw {
        if !GENRES.contains(&genre.as_str()) {
            return Err(ValidationError::UnknownGenre(genre.clone()));
        }
        if !genres.contains(genre) {
            genres.push(genre.clone());
        }
    }
    Ok(genres)
}

/// Parse a form rating and optional comment into a [`ReviewDraft`].
pub fn validate_review(rating: &str, comment: Option<&str>) -> Result<ReviewDraft, ValidationError> {
    let value: i64 = rating
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidNumber {
            field: "rating",
            value: rating.to_string(),
        })?;
    if value < i64::from(RATING_MIN) || value > i64::from(RATING_MAX) {
        return Err(ValidationError::RatingOutOfRange {
            value,
            min: RATING_MIN,
            max: RATING_MAX,
        });
    }
    let comment = comment.map(str::trim).filter(|c| !c.is_empty());
    if let Some(text) = comment {
        check_length("comment", text, 1, REVIEW_COMMENT_MAX_LEN)?;
    }
    Ok(ReviewDraft {
        rating: value as u8,
        comment: comment.map(str::to_string),
    })
}
