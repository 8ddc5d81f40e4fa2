use serde::{Deserialize, Serialize};

use super::defaults;

/// Page sizes for paginated listings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PaginationConfig {
    pub books_per_page: Option<u32>,
    pub reviews_per_page: Option<u32>,
}

impl PaginationConfig {
    pub fn effective_books_per_page(&self) -> u32 {
        self.books_per_page
            .unwrap_or(defaults::DEFAULT_BOOKS_PER_PAGE)
    }

    pub fn effective_reviews_per_page(&self) -> u32 {
        self.reviews_per_page
            .unwrap_or(defaults::DEFAULT_REVIEWS_PER_PAGE)
    }
}
