use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-side session state referenced by the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: String,
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub csrf_token: String,
    /// Pending one-shot messages, shown on the next rendered page.
    pub flashes: Vec<String>,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}
