use chrono::{DateTime, Utc};

use crate::errors::LibrisResult;
use crate::models::SessionRecord;

/// Server-side session persistence.
pub trait ISessionStorage: Send + Sync {
    /// Returns `None` for unknown or expired sessions. Expired rows are removed.
    fn load_session(&self, session_id: &str, now: DateTime<Utc>) -> LibrisResult<Option<SessionRecord>>;
    /// Insert or replace.
    fn save_session(&self, session: &SessionRecord) -> LibrisResult<()>;
    fn delete_session(&self, session_id: &str) -> LibrisResult<()>;
    fn purge_expired_sessions(&self, now: DateTime<Utc>) -> LibrisResult<usize>;
}
