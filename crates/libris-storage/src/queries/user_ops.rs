//! users table queries.

use rusqlite::{params, Connection, OptionalExtension};

use libris_core::errors::LibrisResult;
use libris_core::models::{Credentials, User};

use super::count_to_u64;
use crate::sqlite_err;

/// Insert a user; a taken username surfaces as a constraint violation.
pub fn create_user(conn: &Connection, username: &str, password_hash: &str) -> LibrisResult<i64> {
    conn.execute(
        "INSERT INTO users (username, password_hash) VALUES (?1, ?2)",
        params![username, password_hash],
    )
    .map_err(sqlite_err)?;
    Ok(conn.last_insert_rowid())
}

pub fn get_credentials(conn: &Connection, username: &str) -> LibrisResult<Option<Credentials>> {
    conn.prepare_cached("SELECT user_id, password_hash FROM users WHERE username = ?1")
        .map_err(sqlite_err)?
        .query_row(params![username], |row| {
            Ok(Credentials {
                user_id: row.get(0)?,
                password_hash: row.get(1)?,
            })
        })
        .optional()
        .map_err(sqlite_err)
}

pub fn get_user(conn: &Connection, user_id: i64) -> LibrisResult<Option<User>> {
    conn.prepare_cached("SELECT user_id, username, join_date FROM users WHERE user_id = ?1")
        .map_err(sqlite_err)?
        .query_row(params![user_id], |row| {
            Ok(User {
                user_id: row.get(0)?,
                username: row.get(1)?,
                join_date: row.get(2)?,
            })
        })
        .optional()
        .map_err(sqlite_err)
}

pub fn user_count(conn: &Connection) -> LibrisResult<u64> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .map_err(sqlite_err)?;
    Ok(count_to_u64(count))
}
