//! Review CRUD and per-book aggregation.

use rusqlite::{params, Connection, OptionalExtension, Row};

use libris_core::errors::{LibrisResult, StorageError};
use libris_core::models::{Page, PageRequest, RatingSummary, Review, ReviewDraft};

use super::count_to_u64;
use crate::sqlite_err;

const REVIEW_COLUMNS: &str = "r.review_id, r.book_id, r.user_id, u.username, r.rating, r.comment,
                              r.created_at, r.updated_at";

fn row_to_review(row: &Row<'_>) -> rusqlite::Result<Review> {
    Ok(Review {
        review_id: row.get(0)?,
        book_id: row.get(1)?,
        user_id: row.get(2)?,
        username: row.get(3)?,
        rating: row.get(4)?,
        comment: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

/// Insert a review. A second review by the same user on the same book is a
/// constraint violation (UNIQUE(book_id, user_id)).
pub fn insert_review(
    conn: &Connection,
    book_id: i64,
    user_id: i64,
    draft: &ReviewDraft,
) -> LibrisResult<i64> {
    conn.execute(
        "INSERT INTO reviews (book_id, user_id, rating, comment) VALUES (?1, ?2, ?3, ?4)",
        params![book_id, user_id, draft.rating, draft.comment],
    )
    .map_err(sqlite_err)?;
    Ok(conn.last_insert_rowid())
}

pub fn get_review(conn: &Connection, book_id: i64, user_id: i64) -> LibrisResult<Option<Review>> {
    let sql = format!(
        "SELECT {REVIEW_COLUMNS}
         FROM reviews r JOIN users u ON u.user_id = r.user_id
         WHERE r.book_id = ?1 AND r.user_id = ?2"
    );
    conn.prepare_cached(&sql)
        .map_err(sqlite_err)?
        .query_row(params![book_id, user_id], row_to_review)
        .optional()
        .map_err(sqlite_err)
}

pub fn update_review(
    conn: &Connection,
    book_id: i64,
    user_id: i64,
    draft: &ReviewDraft,
) -> LibrisResult<()> {
    let updated = conn
        .execute(
            "UPDATE reviews
             SET rating = ?3, comment = ?4,
                 updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
             WHERE book_id = ?1 AND user_id = ?2",
            params![book_id, user_id, draft.rating, draft.comment],
        )
        .map_err(sqlite_err)?;
    if updated == 0 {
        return Err(StorageError::NotFound {
            entity: "review",
            id: book_id,
        }
        .into());
    }
    Ok(())
}

/// Returns whether a review was removed.
pub fn delete_review(conn: &Connection, book_id: i64, user_id: i64) -> LibrisResult<bool> {
    let deleted = conn
        .execute(
            "DELETE FROM reviews WHERE book_id = ?1 AND user_id = ?2",
            params![book_id, user_id],
        )
        .map_err(sqlite_err)?;
    Ok(deleted > 0)
}

/// Reviews of a book, newest first.
pub fn reviews_for_book(
    conn: &Connection,
    book_id: i64,
    page: PageRequest,
) -> LibrisResult<Page<Review>> {
    let total: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM reviews WHERE book_id = ?1",
            params![book_id],
            |row| row.get(0),
        )
        .map_err(sqlite_err)?;

    let sql = format!(
        "SELECT {REVIEW_COLUMNS}
         FROM reviews r JOIN users u ON u.user_id = r.user_id
         WHERE r.book_id = ?1
         ORDER BY r.created_at DESC, r.review_id DESC
         LIMIT ?2 OFFSET ?3"
    );
    let mut stmt = conn.prepare_cached(&sql).map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![book_id, page.limit(), page.offset()], row_to_review)
        .map_err(sqlite_err)?;
    let items = rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)?;
    Ok(Page::new(items, page, count_to_u64(total)))
}

pub fn rating_summary(conn: &Connection, book_id: i64) -> LibrisResult<RatingSummary> {
    let (count, average): (i64, Option<f64>) = conn
        .query_row(
            "SELECT COUNT(*), AVG(rating) FROM reviews WHERE book_id = ?1",
            params![book_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .map_err(sqlite_err)?;
    Ok(RatingSummary {
        count: count_to_u64(count),
        average,
    })
}

pub fn review_count_by_user(conn: &Connection, user_id: i64) -> LibrisResult<u64> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM reviews WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )
        .map_err(sqlite_err)?;
    Ok(count_to_u64(count))
}
