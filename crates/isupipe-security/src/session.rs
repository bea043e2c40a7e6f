//! Session identifiers and the cookie that carries them

use isupipe_shared::constants::SESSION_COOKIE_NAME;
use uuid::Uuid;

/// New opaque session identifier (UUIDv4, 122 random bits).
pub fn generate_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// Render a `Set-Cookie` value for the session id.
pub fn build_set_cookie(session_id: &str, max_age_seconds: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        SESSION_COOKIE_NAME, session_id, max_age_seconds
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Find the session id among raw `Cookie` header values.
///
/// Each value may hold several `name=value` pairs separated by `;`. The first
/// non-empty session cookie wins.
pub fn extract_session_id<'a, I>(cookie_headers: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    cookie_headers
        .into_iter()
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| name.trim() == SESSION_COOKIE_NAME && !value.trim().is_empty())
        .map(|(_, value)| value.trim().trim_matches('"'))
}
