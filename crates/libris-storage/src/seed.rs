//! Bulk synthetic data for load testing the catalog.
//!
//! Inserts users `user{n}`, books `book {n}` by `author{2n}` owned by random
//! seeded users, and one random-rated review per seeded user, all in a single
//! transaction with prepared statements.

use rand::Rng;
use rusqlite::{params, Connection};

use libris_core::errors::LibrisResult;

use crate::{sqlite_err, to_storage_err};

/// What to generate.
#[derive(Debug, Clone)]
pub struct SeedPlan {
    pub users: u64,
    pub books: u64,
    /// Shared password hash for every seeded user.
    pub password_hash: String,
}

/// What was generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: u64,
    pub books: u64,
    pub reviews: u64,
}

/// Populate the database according to `plan`.
///
/// Numbering continues after the highest existing `user{n}` name, so neither
/// earlier seeds nor registered accounts of that shape collide.
pub fn seed_catalog<R: Rng>(conn: &Connection, plan: &SeedPlan, rng: &mut R) -> LibrisResult<SeedReport> {
    if plan.users == 0 {
        return Ok(SeedReport::default());
    }

    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("seed begin: {e}")))?;

    match seed_inner(&tx, plan, rng) {
        Ok(report) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("seed commit: {e}")))?;
            Ok(report)
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

/// Largest `n` among usernames of the form `user{n}` (digits only), or 0.
fn highest_seeded_number(conn: &Connection) -> LibrisResult<u64> {
    let highest: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(CAST(substr(username, 5) AS INTEGER)), 0)
             FROM users
             WHERE username GLOB 'user[0-9]*' AND substr(username, 5) NOT GLOB '*[^0-9]*'",
            [],
            |row| row.get(0),
        )
        .map_err(sqlite_err)?;
    Ok(u64::try_from(highest).unwrap_or(0))
}

fn seed_inner<R: Rng>(conn: &Connection, plan: &SeedPlan, rng: &mut R) -> LibrisResult<SeedReport> {
    let start = highest_seeded_number(conn)?.saturating_add(1);
    let mut report = SeedReport::default();

    tracing::info!(users = plan.users, "generating user data");
    let mut user_ids = Vec::with_capacity(usize::try_from(plan.users).unwrap_or(0));
    {
        let mut stmt = conn
            .prepare(
                "INSERT INTO users (username, password_hash, join_date) VALUES (?1, ?2, date('now'))",
            )
            .map_err(sqlite_err)?;
        for i in start..start.saturating_add(plan.users) {
            stmt.execute(params![format!("user{i}"), plan.password_hash])
                .map_err(sqlite_err)?;
            user_ids.push(conn.last_insert_rowid());
            report.users += 1;
        }
    }

    tracing::info!(books = plan.books, "generating book data");
    let mut first_book_id = None;
    let mut last_book_id = 0;
    {
        let mut stmt = conn
            .prepare("INSERT INTO books (user_id, title, author) VALUES (?1, ?2, ?3)")
            .map_err(sqlite_err)?;
        for i in 1..=plan.books {
            let owner = user_ids[rng.random_range(0..user_ids.len())];
            stmt.execute(params![owner, format!("book {i}"), format!("author{}", i * 2)])
                .map_err(sqlite_err)?;
            last_book_id = conn.last_insert_rowid();
            first_book_id.get_or_insert(last_book_id);
            report.books += 1;
        }
    }

    if let Some(first) = first_book_id {
        tracing::info!(reviews = user_ids.len(), "generating review data");
        let mut stmt = conn
            .prepare("INSERT INTO reviews (book_id, user_id, rating) VALUES (?1, ?2, ?3)")
            .map_err(sqlite_err)?;
        for &user_id in &user_ids {
            let book_id = rng.random_range(first..=last_book_id);
            let rating: u8 = rng.random_range(1..=5);
            stmt.execute(params![book_id, user_id, rating])
                .map_err(sqlite_err)?;
            report.reviews += 1;
        }
    }

    tracing::info!(
        users = report.users,
        books = report.books,
        reviews = report.reviews,
        "seeding done"
    );
    Ok(report)
}
