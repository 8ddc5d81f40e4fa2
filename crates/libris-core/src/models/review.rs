use serde::{Deserialize, Serialize};

/// A user's review of a book. At most one per (book, user).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub review_id: i64,
    pub book_id: i64,
    pub user_id: i64,
    pub username: String,
    pub rating: u8,
    pub comment: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Validated review content, used for both create and edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    pub rating: u8,
    pub comment: Option<String>,
}

/// Aggregate rating for a book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub count: u64,
    pub average: Option<f64>,
}
