//! Insert, update, get, delete, and paginated listings for books.

use rusqlite::{params, Connection, OptionalExtension, Row};

use libris_core::constants::{ATTR_GENRE, ATTR_PUBLICATION_DATE};
use libris_core::errors::{LibrisResult, StorageError};
use libris_core::models::{Book, BookSummary, BookUpdate, NewBook, Page, PageRequest};

use super::attribute_ops::{insert_attribute, replace_attribute};
use super::count_to_u64;
use crate::{sqlite_err, to_storage_err};

/// Insert a book and its attributes. Book row and attribute rows are all-or-nothing.
pub fn insert_book(conn: &Connection, book: &NewBook) -> LibrisResult<i64> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("insert_book begin: {e}")))?;

    match insert_book_inner(&tx, book) {
        Ok(book_id) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("insert_book commit: {e}")))?;
            Ok(book_id)
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

fn insert_book_inner(conn: &Connection, book: &NewBook) -> LibrisResult<i64> {
    conn.execute(
        "INSERT INTO books (user_id, title, author) VALUES (?1, ?2, ?3)",
        params![book.user_id, book.title, book.author],
    )
    .map_err(sqlite_err)?;
    let book_id = conn.last_insert_rowid();

    if let Some(ref date) = book.publication_date {
        insert_attribute(conn, book_id, ATTR_PUBLICATION_DATE, date)?;
    }
    for genre in &book.genres {
        insert_attribute(conn, book_id, ATTR_GENRE, genre)?;
    }
    Ok(book_id)
}

fn row_to_book(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        book_id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        author: row.get(3)?,
    })
}

fn row_to_summary(row: &Row<'_>) -> rusqlite::Result<BookSummary> {
    Ok(BookSummary {
        book_id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        owner: row.get(3)?,
    })
}

pub fn get_book(conn: &Connection, book_id: i64) -> LibrisResult<Option<Book>> {
    conn.prepare_cached("SELECT book_id, user_id, title, author FROM books WHERE book_id = ?1")
        .map_err(sqlite_err)?
        .query_row(params![book_id], row_to_book)
        .optional()
        .map_err(sqlite_err)
}

/// Books whose title equals `title` exactly, oldest first.
pub fn books_by_title(conn: &Connection, title: &str) -> LibrisResult<Vec<Book>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT book_id, user_id, title, author FROM books
             WHERE title = ?1 ORDER BY book_id",
        )
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![title], row_to_book)
        .map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}

/// Apply a partial update in one transaction.
pub fn update_book(conn: &Connection, book_id: i64, update: &BookUpdate) -> LibrisResult<()> {
    if update.is_empty() {
        return Ok(());
    }
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("update_book begin: {e}")))?;

    match update_book_inner(&tx, book_id, update) {
        Ok(()) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("update_book commit: {e}")))?;
            Ok(())
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

fn update_book_inner(conn: &Connection, book_id: i64, update: &BookUpdate) -> LibrisResult<()> {
    let exists = conn
        .query_row(
            "SELECT 1 FROM books WHERE book_id = ?1",
            params![book_id],
            |_| Ok(()),
        )
        .optional()
        .map_err(sqlite_err)?;
    if exists.is_none() {
        return Err(StorageError::NotFound {
            entity: "book",
            id: book_id,
        }
        .into());
    }

    if let Some(ref title) = update.title {
        conn.execute(
            "UPDATE books SET title = ?2 WHERE book_id = ?1",
            params![book_id, title],
        )
        .map_err(sqlite_err)?;
    }
    if let Some(ref author) = update.author {
        conn.execute(
            "UPDATE books SET author = ?2 WHERE book_id = ?1",
            params![book_id, author],
        )
        .map_err(sqlite_err)?;
    }
    if let Some(ref date) = update.publication_date {
        let values: Vec<String> = date.iter().cloned().collect();
        replace_attribute(conn, book_id, ATTR_PUBLICATION_DATE, &values)?;
    }
    if let Some(ref genres) = update.genres {
        replace_attribute(conn, book_id, ATTR_GENRE, genres)?;
    }
    Ok(())
}

/// Delete a book. Attributes and reviews go with it (ON DELETE CASCADE).
pub fn delete_book(conn: &Connection, book_id: i64) -> LibrisResult<()> {
    let deleted = conn
        .execute("DELETE FROM books WHERE book_id = ?1", params![book_id])
        .map_err(sqlite_err)?;
    if deleted == 0 {
        return Err(StorageError::NotFound {
            entity: "book",
            id: book_id,
        }
        .into());
    }
    Ok(())
}

/// All books, newest first.
pub fn list_books(conn: &Connection, page: PageRequest) -> LibrisResult<Page<BookSummary>> {
    let total: i64 = conn
        .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))
        .map_err(sqlite_err)?;

    let mut stmt = conn
        .prepare_cached(
            "SELECT b.book_id, b.title, b.author, u.username
             FROM books b JOIN users u ON u.user_id = b.user_id
             ORDER BY b.book_id DESC
             LIMIT ?1 OFFSET ?2",
        )
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![page.limit(), page.offset()], row_to_summary)
        .map_err(sqlite_err)?;
    let items = rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)?;
    Ok(Page::new(items, page, count_to_u64(total)))
}

/// Books added by one user, newest first.
pub fn books_by_user(
    conn: &Connection,
    user_id: i64,
    page: PageRequest,
) -> LibrisResult<Page<BookSummary>> {
    let total: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM books WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )
        .map_err(sqlite_err)?;

    let mut stmt = conn
        .prepare_cached(
            "SELECT b.book_id, b.title, b.author, u.username
             FROM books b JOIN users u ON u.user_id = b.user_id
             WHERE b.user_id = ?1
             ORDER BY b.book_id DESC
             LIMIT ?2 OFFSET ?3",
        )
        .map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params![user_id, page.limit(), page.offset()], row_to_summary)
        .map_err(sqlite_err)?;
    let items = rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)?;
    Ok(Page::new(items, page, count_to_u64(total)))
}
