//! User entity representing a registered account in the Inkwell system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity: the principal behind every authenticated request.
///
/// Owned by the user store; the token pipeline re-reads it fresh on every
/// request so role and ban changes take effect promptly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address, unique across accounts
    pub email: String,

    /// Password hash (opaque to everything but the auth service)
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Whether the user is an administrator
    pub is_admin: bool,

    /// Whether the user account is banned
    pub is_banned: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance
    pub fn new(email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            is_admin: false,
            is_banned: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Bans the user account
    pub fn ban(&mut self) {
        self.is_banned = true;
        self.updated_at = Utc::now();
    }

    /// Lifts a ban
    pub fn unban(&mut self) {
        self.is_banned = false;
        self.updated_at = Utc::now();
    }

    /// Grants administrator privileges
    pub fn promote(&mut self) {
        self.is_admin = true;
        self.updated_at = Utc::now();
    }

    /// Replaces the stored credential hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}
