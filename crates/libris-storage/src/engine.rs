//! StorageEngine: owns the ConnectionPool, implements ICatalogStorage +
//! ISessionStorage, runs migrations at startup.

use std::path::Path;

use chrono::{DateTime, Utc};
use rand::Rng;

use libris_core::config::StorageConfig;
use libris_core::errors::LibrisResult;
use libris_core::models::{
    Book, BookAttributes, BookSummary, BookUpdate, Credentials, NewBook, Page, PageRequest,
    RatingSummary, Review, ReviewDraft, SessionRecord, User,
};
use libris_core::traits::{ICatalogStorage, ISessionStorage};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{attribute_ops, book_ops, review_ops, search_ops, session_ops, user_ops};
use crate::seed::{self, SeedPlan, SeedReport};

/// The main storage engine. Owns the connection pool and provides the full
/// catalog and session interface.
///
/// All methods are blocking; async callers go through `spawn_blocking`.
pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk with default settings.
    pub fn open(path: &Path) -> LibrisResult<Self> {
        Self::open_with(path, &StorageConfig::default())
    }

    /// Open a file-backed engine using the pool size and busy timeout from `config`.
    pub fn open_with(path: &Path, config: &StorageConfig) -> LibrisResult<Self> {
        let pool = ConnectionPool::open(
            path,
            config.effective_read_pool_size(),
            config.effective_busy_timeout_ms(),
        )?;
        let engine = Self { pool };
        engine.initialize()?;
        tracing::debug!(
            path = %path.display(),
            readers = engine.pool.reader_count(),
            "storage engine ready"
        );
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> LibrisResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        let engine = Self { pool };
        engine.initialize()?;
        Ok(engine)
    }

    /// Run migrations.
    fn initialize(&self) -> LibrisResult<()> {
        self.pool.writer.with_conn_sync(migrations::run_migrations)
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Current schema version.
    pub fn schema_version(&self) -> LibrisResult<u32> {
        self.pool.writer.with_conn_sync(migrations::current_version)
    }

    /// Bulk-generate synthetic users, books and reviews.
    pub fn seed<R: Rng>(&self, plan: &SeedPlan, rng: &mut R) -> LibrisResult<SeedReport> {
        self.pool
            .writer
            .with_conn_sync(|conn| seed::seed_catalog(conn, plan, rng))
    }

    /// Execute a read-only query on a pooled reader, or on the writer when
    /// the database has no readers (in-memory).
    fn with_reader<F, T>(&self, f: F) -> LibrisResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> LibrisResult<T>,
    {
        match self.pool.readers {
            Some(ref readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn_sync(f),
        }
    }

    fn with_writer<F, T>(&self, f: F) -> LibrisResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> LibrisResult<T>,
    {
        self.pool.writer.with_conn_sync(f)
    }
}

impl ICatalogStorage for StorageEngine {
    fn create_user(&self, username: &str, password_hash: &str) -> LibrisResult<i64> {
        self.with_writer(|conn| user_ops::create_user(conn, username, password_hash))
    }

    fn get_credentials(&self, username: &str) -> LibrisResult<Option<Credentials>> {
        self.with_reader(|conn| user_ops::get_credentials(conn, username))
    }

    fn get_user(&self, user_id: i64) -> LibrisResult<Option<User>> {
        self.with_reader(|conn| user_ops::get_user(conn, user_id))
    }

    fn user_count(&self) -> LibrisResult<u64> {
        self.with_reader(user_ops::user_count)
    }

    fn add_book(&self, book: &NewBook) -> LibrisResult<i64> {
        self.with_writer(|conn| book_ops::insert_book(conn, book))
    }

    fn get_book(&self, book_id: i64) -> LibrisResult<Option<Book>> {
        self.with_reader(|conn| book_ops::get_book(conn, book_id))
    }

    fn get_book_attributes(&self, book_id: i64) -> LibrisResult<BookAttributes> {
        self.with_reader(|conn| attribute_ops::get_attributes(conn, book_id))
    }

    fn books_by_title(&self, title: &str) -> LibrisResult<Vec<Book>> {
        self.with_reader(|conn| book_ops::books_by_title(conn, title))
    }

    fn similar_titles(&self, tokens: &[String], limit: usize) -> LibrisResult<Vec<String>> {
        self.with_reader(|conn| search_ops::similar_titles(conn, tokens, limit))
    }

    fn update_book(&self, book_id: i64, update: &BookUpdate) -> LibrisResult<()> {
        self.with_writer(|conn| book_ops::update_book(conn, book_id, update))
    }

    fn delete_book(&self, book_id: i64) -> LibrisResult<()> {
        self.with_writer(|conn| book_ops::delete_book(conn, book_id))
    }

    fn list_books(&self, page: PageRequest) -> LibrisResult<Page<BookSummary>> {
        self.with_reader(|conn| book_ops::list_books(conn, page))
    }

    fn books_by_user(&self, user_id: i64, page: PageRequest) -> LibrisResult<Page<BookSummary>> {
        self.with_reader(|conn| book_ops::books_by_user(conn, user_id, page))
    }

    fn add_review(&self, book_id: i64, user_id: i64, draft: &ReviewDraft) -> LibrisResult<i64> {
        self.with_writer(|conn| review_ops::insert_review(conn, book_id, user_id, draft))
    }

    fn get_review(&self, book_id: i64, user_id: i64) -> LibrisResult<Option<Review>> {
        self.with_reader(|conn| review_ops::get_review(conn, book_id, user_id))
    }

    fn update_review(&self, book_id: i64, user_id: i64, draft: &ReviewDraft) -> LibrisResult<()> {
        self.with_writer(|conn| review_ops::update_review(conn, book_id, user_id, draft))
    }

    fn delete_review(&self, book_id: i64, user_id: i64) -> LibrisResult<bool> {
        self.with_writer(|conn| review_ops::delete_review(conn, book_id, user_id))
    }

    fn reviews_for_book(&self, book_id: i64, page: PageRequest) -> LibrisResult<Page<Review>> {
        self.with_reader(|conn| review_ops::reviews_for_book(conn, book_id, page))
    }

    fn rating_summary(&self, book_id: i64) -> LibrisResult<RatingSummary> {
        self.with_reader(|conn| review_ops::rating_summary(conn, book_id))
    }

    fn review_count_by_user(&self, user_id: i64) -> LibrisResult<u64> {
        self.with_reader(|conn| review_ops::review_count_by_user(conn, user_id))
    }
}

impl ISessionStorage for StorageEngine {
    // Loading may delete an expired row, so it goes through the writer.
    fn load_session(&self, session_id: &str, now: DateTime<Utc>) -> LibrisResult<Option<SessionRecord>> {
        self.with_writer(|conn| session_ops::load_session(conn, session_id, now))
    }

    fn save_session(&self, session: &SessionRecord) -> LibrisResult<()> {
        self.with_writer(|conn| session_ops::save_session(conn, session))
    }

    fn delete_session(&self, session_id: &str) -> LibrisResult<()> {
        self.with_writer(|conn| session_ops::delete_session(conn, session_id))
    }

    fn purge_expired_sessions(&self, now: DateTime<Utc>) -> LibrisResult<usize> {
        self.with_writer(|conn| session_ops::purge_expired(conn, now))
    }
}
