//! Login session entity

use chrono::Utc;
use isupipe_security::session::generate_session_id;

/// Server-side half of a login session. The client holds `id` in a cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub user_id: i64,
    /// UNIX seconds after which the session is rejected.
    pub expires: i64,
}

impl Session {
    pub fn new(user_id: i64, ttl_seconds: i64) -> Self {
        Self::issued_at(user_id, Utc::now().timestamp(), ttl_seconds)
    }

    pub fn issued_at(user_id: i64, now: i64, ttl_seconds: i64) -> Self {
        Self {
            id: generate_session_id(),
            user_id,
            expires: now + ttl_seconds,
        }
    }

    /// Still valid at exactly `expires`; rejected one second later.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.expires
    }
}

/// Identity attached to a request that carried a valid session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub session_id: String,
    pub user_id: i64,
}
