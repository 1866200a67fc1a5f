use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An access-role definition (`userroles`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRole {
    pub id: i64,
    pub name: String,
    /// Opaque permissions blob; stored as given.
    pub permissions: Option<String>,
}

/// An account (`users`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub role_id: Option<i64>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub department: Option<String>,
}

/// Insert payload for an account. `status` and `created_at` take the
/// column defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub role_id: Option<i64>,
    pub department: Option<String>,
}
