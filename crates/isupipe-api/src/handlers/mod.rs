//! HTTP handlers

pub mod auth;
pub mod channel;
pub mod health;
pub mod user;

use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Decode a JSON body without insisting on a `Content-Type` header.
pub(crate) fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("Rejecting request body: {}", e);
        ApiError::BadRequest("failed to decode the request body as json".to_string())
    })
}
