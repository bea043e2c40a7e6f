// ============================================================================
// ISUPipe API - User Handlers
// File: crates/isupipe-api/src/handlers/user.rs
// ============================================================================
//! User registration and profile handlers

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use isupipe_core::domain::User;

use super::decode_json;
use crate::error::ApiError;
use crate::extract::CurrentSession;
use crate::state::AppState;

/// Register request payload
#[derive(Debug, Deserialize)]
pub struct PostUserRequest {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    /// Plaintext password
    pub password: String,
}

/// User DTO for responses
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            display_name: user.display_name,
            description: user.description,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Register handler - POST /user
pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let payload: PostUserRequest = decode_json(&body)?;

    let user = state
        .auth
        .register(
            &payload.name,
            &payload.display_name,
            &payload.description,
            &payload.password,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Profile handler - GET /user/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.users.get_profile(&session, &user_id).await?;
    Ok(Json(user.into()))
}

/// GET /user - not implemented
pub async fn user_session() -> StatusCode {
    StatusCode::OK
}
