use crate::errors::LibrisResult;
use crate::models::{
    Book, BookAttributes, BookSummary, BookUpdate, Credentials, NewBook, Page, PageRequest,
    RatingSummary, Review, ReviewDraft, User,
};

/// Users, books, attributes, and reviews.
pub trait ICatalogStorage: Send + Sync {
    // --- Users ---
    fn create_user(&self, username: &str, password_hash: &str) -> LibrisResult<i64>;
    fn get_credentials(&self, username: &str) -> LibrisResult<Option<Credentials>>;
    fn get_user(&self, user_id: i64) -> LibrisResult<Option<User>>;
    fn user_count(&self) -> LibrisResult<u64>;

    // --- Books ---
    fn add_book(&self, book: &NewBook) -> LibrisResult<i64>;
    fn get_book(&self, book_id: i64) -> LibrisResult<Option<Book>>;
    fn get_book_attributes(&self, book_id: i64) -> LibrisResult<BookAttributes>;
    fn books_by_title(&self, title: &str) -> LibrisResult<Vec<Book>>;
    fn similar_titles(&self, tokens: &[String], limit: usize) -> LibrisResult<Vec<String>>;
    fn update_book(&self, book_id: i64, update: &BookUpdate) -> LibrisResult<()>;
    fn delete_book(&self, book_id: i64) -> LibrisResult<()>;
    fn list_books(&self, page: PageRequest) -> LibrisResult<Page<BookSummary>>;
    fn books_by_user(&self, user_id: i64, page: PageRequest) -> LibrisResult<Page<BookSummary>>;

    // --- Reviews ---
    fn add_review(&self, book_id: i64, user_id: i64, draft: &ReviewDraft) -> LibrisResult<i64>;
    fn get_review(&self, book_id: i64, user_id: i64) -> LibrisResult<Option<Review>>;
    fn update_review(&self, book_id: i64, user_id: i64, draft: &ReviewDraft) -> LibrisResult<()>;
    fn delete_review(&self, book_id: i64, user_id: i64) -> LibrisResult<bool>;
    fn reviews_for_book(&self, book_id: i64, page: PageRequest) -> LibrisResult<Page<Review>>;
    fn rating_summary(&self, book_id: i64) -> LibrisResult<RatingSummary>;
    fn review_count_by_user(&self, user_id: i64) -> LibrisResult<u64>;
}
