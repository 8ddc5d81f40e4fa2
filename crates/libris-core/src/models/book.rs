use serde::{Deserialize, Serialize};

/// A catalog entry. `user_id` is the user who added it and may edit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub book_id: i64,
    pub user_id: i64,
    pub title: String,
    pub author: String,
}

/// Optional attributes stored in the `book_attributes` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookAttributes {
    pub publication_date: Option<String>,
    pub genres: Vec<String>,
}

/// A book row joined with its owner's username, used in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub owner: String,
}

/// Input for inserting a book together with its attributes.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub user_id: i64,
    pub title: String,
    pub author: String,
    pub publication_date: Option<String>,
    pub genres: Vec<String>,
}

/// Partial update of a book. `None` leaves a field untouched;
/// `publication_date: Some(None)` removes the date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publication_date: Option<Option<String>>,
    pub genres: Option<Vec<String>>,
}

impl BookUpdate {
    /// Build an update containing only the fields that differ from the
    /// current state. Genres are compared as sets.
    pub fn diff(
        book: &Book,
        attrs: &BookAttributes,
        title: &str,
        author: &str,
        publication_date: Option<&str>,
        genres: &[String],
    ) -> Self {
        let mut update = Self::default();
        if title != book.title {
            update.title = Some(title.to_string());
        }
        if author != book.author {
            update.author = Some(author.to_string());
        }
        if publication_date != attrs.publication_date.as_deref() {
            update.publication_date = Some(publication_date.map(str::to_string));
        }
        let mut current: Vec<&str> = attrs.genres.iter().map(String::as_str).collect();
        let mut wanted: Vec<&str> = genres.iter().map(String::as_str).collect();
        current.sort_unstable();
        current.dedup();
        wanted.sort_unstable();
        wanted.dedup();
        if current != wanted {
            update.genres = Some(genres.to_vec());
        }
        update
    }

    /// Number of fields that would be written.
    pub fn changed_fields(&self) -> usize {
        [
            self.title.is_some(),
            self.author.is_some(),
            self.publication_date.is_some(),
            self.genres.is_some(),
        ]
        .into_iter()
        .filter(|changed| *changed)
        .count()
    }

    /// True when nothing would be written.
    pub fn is_empty(&self) -> bool {
        self.changed_fields() == 0
    }
}
