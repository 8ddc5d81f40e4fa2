//! Structured log events for key catalog operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a new account.
pub fn user_registered(user_id: i64, username: &str) {
    tracing::info!(
        event = "user_registered",
        user_id = user_id,
        username = %username,
        "user registered"
    );
}

/// Log a successful login.
pub fn user_logged_in(user_id: i64) {
    tracing::info!(event = "user_logged_in", user_id = user_id, "user logged in");
}

/// Log a rejected login. The username is recorded, the password never is.
pub fn login_failed(username: &str) {
    tracing::warn!(event = "login_failed", username = %username, "login failed");
}

/// Log a book insertion.
pub fn book_added(book_id: i64, user_id: i64, genres: usize) {
    tracing::info!(
        event = "book_added",
        book_id = book_id,
        user_id = user_id,
        genres = genres,
        "book added"
    );
}

/// Log a book edit with the number of changed fields.
pub fn book_updated(book_id: i64, changed_fields: usize) {
    tracing::info!(
        event = "book_updated",
        book_id = book_id,
        changed_fields = changed_fields,
        "book updated"
    );
}

/// Log a book removal.
pub fn book_deleted(book_id: i64, user_id: i64) {
    tracing::info!(
        event = "book_deleted",
        book_id = book_id,
        user_id = user_id,
        "book deleted"
    );
}

/// Log a review creation or edit.
pub fn review_posted(book_id: i64, user_id: i64, rating: u8, edited: bool) {
    tracing::info!(
        event = "review_posted",
        book_id = book_id,
        user_id = user_id,
        rating = rating,
        edited = edited,
        "review posted"
    );
}

/// Log a title search and how it resolved.
pub fn search_performed(query_len: usize, candidates: usize, suggestions: usize, exact: bool) {
    tracing::debug!(
        event = "search_performed",
        query_len = query_len,
        candidates = candidates,
        suggestions = suggestions,
        exact = exact,
        "title search"
    );
}

/// Log a rejected CSRF token.
pub fn csrf_rejected(path: &str) {
    tracing::warn!(event = "csrf_rejected", path = %path, "csrf token rejected");
}
