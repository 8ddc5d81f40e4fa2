//! Query modules for each domain table.

pub mod attribute_ops;
pub mod book_ops;
pub mod review_ops;
pub mod search_ops;
pub mod session_ops;
pub mod user_ops;

/// Convert a SQLite COUNT(*) to `u64`.
pub(crate) fn count_to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}
