// ============================================================================
// ISUPipe API - Auth Handlers
// File: crates/isupipe-api/src/handlers/auth.rs
// ============================================================================
//! Login handler

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;

use isupipe_security::session::build_set_cookie;

use super::decode_json;
use crate::error::ApiError;
use crate::state::AppState;

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    /// Plaintext password
    pub password: String,
}

/// Login handler - POST /login
///
/// Answers 200 with no body; the session id travels in `Set-Cookie`.
pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let payload: LoginRequest = decode_json(&body)?;

    let result = state.auth.login(&payload.username, &payload.password).await?;

    let cookie = build_set_cookie(
        &result.session_id,
        result.max_age_seconds,
        state.config.session.secure_cookie,
    );

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)]))
}
