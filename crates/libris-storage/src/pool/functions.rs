//! Scalar SQL functions registered on every connection.

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

use libris_core::errors::LibrisResult;

use crate::to_storage_err;

/// Unicode lowercase of its argument; NULL stays NULL.
///
/// SQLite's own `lower()` and `LIKE` only fold ASCII, so the title prefilter
/// compares `libris_fold(title)` against tokens folded the same way.
pub const FOLD_FN: &str = "libris_fold";

pub fn register_functions(conn: &Connection) -> LibrisResult<()> {
    conn.create_scalar_function(
        FOLD_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )
    .map_err(|e| to_storage_err(format!("failed to register {FOLD_FN}: {e}")))
}
