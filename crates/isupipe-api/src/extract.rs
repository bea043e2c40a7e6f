//! Session cookie extractor

use axum::{extract::FromRequestParts, http::header::COOKIE, http::request::Parts};
use isupipe_core::domain::UserContext;
use isupipe_security::session::extract_session_id;

use crate::error::ApiError;
use crate::state::AppState;

/// A request carrying a live session. Rejects with 403 when the cookie is
/// missing or unknown and 401 when the session has expired.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub UserContext);

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session_id = extract_session_id(
            parts
                .headers
                .get_all(COOKIE)
                .iter()
                .filter_map(|value| value.to_str().ok()),
        );

        let ctx = state.auth.authenticate(session_id).await?;
        Ok(CurrentSession(ctx))
    }
}
