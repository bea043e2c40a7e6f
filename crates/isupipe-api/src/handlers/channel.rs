//! Channel and subscription endpoints.
//!
//! These routes are reserved; each answers 200 with an empty body.

use axum::http::StatusCode;

/// GET /user/{user_id}/channel
pub async fn user_channels() -> StatusCode {
    StatusCode::OK
}

/// POST /user/{user_id}/channel/{channel_id}/subscribe
pub async fn subscribe_channel() -> StatusCode {
    StatusCode::OK
}

/// POST /user/{user_id}/channel/{channel_id}/unsubscribe
pub async fn unsubscribe_channel() -> StatusCode {
    StatusCode::OK
}

/// GET /channel/{channel_id}
pub async fn channel() -> StatusCode {
    StatusCode::OK
}

/// GET /channel/{channel_id}/subscribers
pub async fn channel_subscribers() -> StatusCode {
    StatusCode::OK
}

/// GET /channel/{channel_id}/movie
pub async fn channel_movies() -> StatusCode {
    StatusCode::OK
}

/// POST /channel
pub async fn create_channel() -> StatusCode {
    StatusCode::OK
}

/// PUT /channel/{channel_id}
pub async fn update_channel() -> StatusCode {
    StatusCode::OK
}

/// DELETE /channel/{channel_id}
pub async fn delete_channel() -> StatusCode {
    StatusCode::OK
}
