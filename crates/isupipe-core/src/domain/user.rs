// ============================================================================
// ISUPipe Core - User Entity
// File: crates/isupipe-core/src/domain/user.rs
// ============================================================================
//! User domain entity

use chrono::{DateTime, Utc};

/// Stored user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    /// Unique login name.
    pub name: String,
    pub display_name: String,
    pub description: String,
    /// Password hash; never sent to clients.
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User record before the store assigns an id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub password: String,
}

impl NewUser {
    pub fn new(name: String, display_name: String, description: String, password_hash: String) -> Self {
        Self {
            name,
            display_name,
            description,
            password: password_hash,
        }
    }
}

