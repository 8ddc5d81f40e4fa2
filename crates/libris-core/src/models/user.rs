use serde::{Deserialize, Serialize};

/// A registered user as shown on profile pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    /// ISO date (`YYYY-MM-DD`) the account was created.
    pub join_date: String,
}

/// Stored login material for a username.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user_id: i64,
    /// PHC-format password hash.
    pub password_hash: String,
}
