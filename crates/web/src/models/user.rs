//! User domain types.

use chrono::{DateTime, Utc};

use pricelens_core::{Email, Role, UserId};

/// A Pricelens account (domain type).
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name.
    pub full_name: String,
    /// Optional contact phone.
    pub phone: Option<String>,
    /// Customer or shopkeeper.
    pub role: Role,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
