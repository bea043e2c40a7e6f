use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

use crate::handlers::{auth, channel, health, user};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Health checks
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Users and sessions
    let user_routes = Router::new()
        .route("/user", post(user::register).get(user::user_session))
        .route("/login", post(auth::login))
        .route("/user/{user_id}", get(user::get_user))
        .route("/user/{user_id}/channel", get(channel::user_channels))
        .route(
            "/user/{user_id}/channel/{channel_id}/subscribe",
            post(channel::subscribe_channel),
        )
        .route(
            "/user/{user_id}/channel/{channel_id}/unsubscribe",
            post(channel::unsubscribe_channel),
        );

    // Channels
    let channel_routes = Router::new()
        .route("/channel", post(channel::create_channel))
        .route(
            "/channel/{channel_id}",
            get(channel::channel)
                .put(channel::update_channel)
                .delete(channel::delete_channel),
        )
        .route("/channel/{channel_id}/subscribers", get(channel::channel_subscribers))
        .route("/channel/{channel_id}/movie", get(channel::channel_movies));

    Router::new()
        .merge(health_routes)
        .merge(user_routes)
        .merge(channel_routes)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
}
