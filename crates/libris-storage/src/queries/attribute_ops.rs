//! book_attributes (key/value rows per book).

use rusqlite::{params, Connection};

use libris_core::constants::{ATTR_GENRE, ATTR_PUBLICATION_DATE};
use libris_core::errors::LibrisResult;
use libris_core::models::BookAttributes;

use crate::sqlite_err;

pub fn insert_attribute(conn: &Connection, book_id: i64, key: &str, value: &str) -> LibrisResult<()> {
    conn.prepare_cached(
        "INSERT INTO book_attributes (book_id, attribute_key, attribute_value) VALUES (?1, ?2, ?3)",
    )
    .map_err(sqlite_err)?
    .execute(params![book_id, key, value])
    .map_err(sqlite_err)?;
    Ok(())
}

/// Replace every value stored under `key` with `values`.
pub fn replace_attribute(
    conn: &Connection,
    book_id: i64,
    key: &str,
    values: &[String],
) -> LibrisResult<()> {
    conn.execute(
        "DELETE FROM book_attributes WHERE book_id = ?1 AND attribute_key = ?2",
        params![book_id, key],
    )
    .map_err(sqlite_err)?;
    for value in values {
        insert_attribute(conn, book_id, key, value)?;
    }
    Ok(())
}

/// Load all attributes of a book. Genres keep insertion order.
pub fn get_attributes(conn: &Connection, book_id: i64) -> LibrisResult<BookAttributes> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT attribute_key, attribute_value FROM book_attributes
             WHERE book_id = ?1 ORDER BY rowid",
        )
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![book_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(sqlite_err)?;

    let mut attrs = BookAttributes::default();
    for row in rows {
        let (key, value) = row.map_err(sqlite_err)?;
        match key.as_str() {
            ATTR_PUBLICATION_DATE => attrs.publication_date = Some(value),
            ATTR_GENRE => attrs.genres.push(value),
            other => tracing::debug!(book_id, key = %other, "ignoring unknown book attribute"),
        }
    }
    Ok(attrs)
}
