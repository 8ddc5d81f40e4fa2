//! LIKE-based candidate retrieval for title search.

use rusqlite::{params_from_iter, Connection};

use libris_core::errors::LibrisResult;

use crate::pool::functions::FOLD_FN;
use crate::sqlite_err;

/// Escape `%`, `_` and the escape character itself for a LIKE pattern.
fn escape_like(token: &str) -> String {
    let mut escaped = String::with_capacity(token.len() + 2);
    for c in token.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Distinct titles containing any of `tokens`, ignoring case (Unicode
/// lowercase on both sides), capped at `limit`. No tokens means no candidates.
pub fn similar_titles(conn: &Connection, tokens: &[String], limit: usize) -> LibrisResult<Vec<String>> {
    if tokens.is_empty() || limit == 0 {
        return Ok(Vec::new());
    }

    let clauses: Vec<String> = (1..=tokens.len())
        .map(|i| format!("{FOLD_FN}(title) LIKE ?{i} ESCAPE '\\'"))
        .collect();
    let sql = format!(
        "SELECT DISTINCT title FROM books WHERE {} LIMIT {}",
        clauses.join(" OR "),
        limit
    );

    let patterns = tokens
        .iter()
        .map(|t| format!("%{}%", escape_like(&t.to_lowercase())));
    let mut stmt = conn.prepare(&sql).map_err(sqlite_err)?;
    let rows = stmt
        .query_map(params_from_iter(patterns), |row| row.get::<_, String>(0))
        .map_err(sqlite_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sqlite_err)
}
