//! Book update diffing and session helpers.

use chrono::{Duration, Utc};
use libris_core::models::{Book, BookAttributes, BookUpdate, SessionRecord};

fn dune() -> (Book, BookAttributes) {
    (
        Book {
            book_id: 1,
            user_id: 7,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
        },
        BookAttributes {
            publication_date: Some("1965-08-01".to_string()),
            genres: vec!["Science fiction".to_string(), "Classic".to_string()],
        },
    )
}

#[test]
fn unchanged_form_produces_empty_update() {
    let (book, attrs) = dune();
    // genre order does not matter
    let genres = vec!["Classic".to_string(), "Science fiction".to_string()];
    let update = BookUpdate::diff(&book, &attrs, "Dune", "Frank Herbert", Some("1965-08-01"), &genres);
    assert!(update.is_empty());
    assert_eq!(update.changed_fields(), 0);
}

#[test]
fn only_changed_fields_are_set() {
    let (book, attrs) = dune();
    let update = BookUpdate::diff(
        &book,
        &attrs,
        "Dune Messiah",
        "Frank Herbert",
        None,
        &attrs.genres,
    );
    assert_eq!(update.title.as_deref(), Some("Dune Messiah"));
    assert!(update.author.is_none());
    assert_eq!(update.publication_date, Some(None));
    assert!(update.genres.is_none());
    assert_eq!(update.changed_fields(), 2);
}

#[test]
fn session_expiry_and_authentication() {
    let now = Utc::now();
    let session = SessionRecord {
        session_id: "abc".to_string(),
        user_id: Some(3),
        username: Some("bookworm".to_string()),
        csrf_token: "tok".to_string(),
        flashes: Vec::new(),
        expires_at: now + Duration::minutes(5),
    };
    assert!(session.is_authenticated());
    assert!(!session.is_expired(now));
    assert!(session.is_expired(now + Duration::minutes(5)));
}
