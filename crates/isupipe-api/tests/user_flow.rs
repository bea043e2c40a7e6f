use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use isupipe_api::{build_router, AppState};
use isupipe_core::domain::Session;
use isupipe_core::repositories::SessionRepository;
use isupipe_infrastructure::InMemoryStore;
use isupipe_shared::config::AppConfig;

// Helper to create config; sha512 keeps the tests fast
fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.password.scheme = "sha512".to_string();
    config
}

fn test_app(config: AppConfig) -> (Router, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let state = AppState::new(config, store.clone(), store.clone(), store.clone()).unwrap();
    (build_router(state), store)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_with_cookie(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn test_user() -> Value {
    json!({
        "name": "test",
        "display_name": "test",
        "description": "blah",
        "password": "s3cr3t",
    })
}

/// `SESSIONID=<id>` from a login response.
fn session_cookie(response: &Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login sets a cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

async fn register_and_login(app: &Router) -> String {
    let response = app.clone().oneshot(post_json("/user", test_user())).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(post_json("/login", json!({"username": "test", "password": "s3cr3t"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response)
}

#[tokio::test]
async fn test_register_login_and_fetch_profile() {
    let (app, _store) = test_app(test_config());

    let response = app.clone().oneshot(post_json("/user", test_user())).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "test");
    assert!(created.get("password").is_none());

    let response = app
        .clone()
        .oneshot(post_json("/login", json!({"username": "test", "password": "s3cr3t"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.starts_with("SESSIONID="));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=600"));
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(get_with_cookie("/user/1", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let profile = body_json(response).await;
    assert_eq!(profile["name"], "test");
    assert_eq!(profile["display_name"], "test");
    assert_eq!(profile["description"], "blah");
    assert_eq!(profile["created_at"], created["created_at"]);
    assert_eq!(profile["updated_at"], created["updated_at"]);

    let response = app.oneshot(get_with_cookie("/user/1", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_rejects_malformed_json() {
    let (app, store) = test_app(test_config());

    let request = Request::builder()
        .method("POST")
        .uri("/user")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.user_count(), 0);
}

#[tokio::test]
async fn test_register_accepts_json_without_content_type() {
    let (app, _store) = test_app(test_config());

    let request = Request::builder()
        .method("POST")
        .uri("/user")
        .body(Body::from(test_user().to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let (app, store) = test_app(test_config());

    let first = app.clone().oneshot(post_json("/user", test_user())).await.unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.oneshot(post_json("/user", test_user())).await.unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = body_json(second).await;
    assert_eq!(body["error"], "Conflict");
    assert_eq!(store.user_count(), 1);
}

#[tokio::test]
async fn test_login_failures_are_unauthorized() {
    let (app, store) = test_app(test_config());
    app.clone().oneshot(post_json("/user", test_user())).await.unwrap();

    let wrong_password = app
        .clone()
        .oneshot(post_json("/login", json!({"username": "test", "password": "nope"})))
        .await
        .unwrap();
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert!(wrong_password.headers().get(header::SET_COOKIE).is_none());
    let wrong_password = body_json(wrong_password).await;

    let unknown_user = app
        .clone()
        .oneshot(post_json("/login", json!({"username": "ghost", "password": "s3cr3t"})))
        .await
        .unwrap();
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(unknown_user).await, wrong_password);

    let malformed = app
        .oneshot(post_json("/login", json!({"username": "test"})))
        .await
        .unwrap();
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.session_count(), 0);
}

#[tokio::test]
async fn test_repeated_logins_issue_distinct_cookies() {
    let (app, store) = test_app(test_config());
    let mut cookies = vec![register_and_login(&app).await];

    for _ in 0..9 {
        let response = app
            .clone()
            .oneshot(post_json("/login", json!({"username": "test", "password": "s3cr3t"})))
            .await
            .unwrap();
        cookies.push(session_cookie(&response));
    }

    cookies.sort();
    cookies.dedup();
    assert_eq!(cookies.len(), 10);
    assert_eq!(store.session_count(), 10);
}

#[tokio::test]
async fn test_unknown_session_is_forbidden() {
    let (app, _store) = test_app(test_config());
    register_and_login(&app).await;

    let response = app
        .oneshot(get_with_cookie("/user/1", Some("SESSIONID=not-a-session")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_expired_session_is_rejected_and_cleaned_up() {
    let (app, store) = test_app(test_config());
    register_and_login(&app).await;

    let expired = Session {
        id: "expired-session".to_string(),
        user_id: 1,
        expires: chrono::Utc::now().timestamp() - 1,
    };
    SessionRepository::create(store.as_ref(), &expired).await.unwrap();
    assert_eq!(store.session_count(), 2);

    let response = app
        .clone()
        .oneshot(get_with_cookie("/user/1", Some("SESSIONID=expired-session")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "session has expired");
    assert_eq!(store.session_count(), 1);

    // Once cleaned up the token is simply unknown.
    let response = app
        .oneshot(get_with_cookie("/user/1", Some("SESSIONID=expired-session")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_any_session_reads_other_profiles_by_default() {
    let (app, _store) = test_app(test_config());
    let cookie = register_and_login(&app).await;

    let other = json!({"name": "other", "display_name": "o", "description": "", "password": "pw"});
    let response = app.clone().oneshot(post_json("/user", other)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(get_with_cookie("/user/2", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "other");
}

#[tokio::test]
async fn test_enforced_ownership_blocks_other_profiles() {
    let mut config = test_config();
    config.session.enforce_ownership = true;
    let (app, _store) = test_app(config);
    let cookie = register_and_login(&app).await;

    let other = json!({"name": "other", "display_name": "o", "description": "", "password": "pw"});
    app.clone().oneshot(post_json("/user", other)).await.unwrap();

    let response = app.clone().oneshot(get_with_cookie("/user/2", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app.oneshot(get_with_cookie("/user/1", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_profile_with_valid_session() {
    let (app, _store) = test_app(test_config());
    let cookie = register_and_login(&app).await;

    let response = app.oneshot(get_with_cookie("/user/99", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_numeric_profile_id_with_valid_session() {
    let (app, _store) = test_app(test_config());
    let cookie = register_and_login(&app).await;

    let response = app
        .clone()
        .oneshot(get_with_cookie("/user/abc", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let body = body_json(response).await;
    assert_eq!(body["error"], "Unauthorized");
    assert_eq!(body["message"], "session has expired");

    let response = app.oneshot(get_with_cookie("/user/abc", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_argon2_scheme_round_trip() {
    let (app, _store) = test_app(AppConfig::default());
    let cookie = register_and_login(&app).await;

    let response = app.oneshot(get_with_cookie("/user/1", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unimplemented_endpoints_answer_empty() {
    let (app, _store) = test_app(test_config());

    let requests = [
        ("GET", "/user"),
        ("GET", "/user/1/channel"),
        ("POST", "/user/1/channel/1/subscribe"),
        ("POST", "/user/1/channel/1/unsubscribe"),
        ("GET", "/channel/1"),
        ("GET", "/channel/1/subscribers"),
        ("GET", "/channel/1/movie"),
        ("POST", "/channel"),
        ("PUT", "/channel/1"),
        ("DELETE", "/channel/1"),
    ];

    for (method, uri) in requests {
        let request = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{} {}", method, uri);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty(), "{} {} returned a body", method, uri);
    }
}

#[tokio::test]
async fn test_health_endpoints() {
    let (app, _store) = test_app(test_config());

    let response = app.clone().oneshot(get_with_cookie("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "healthy");

    let response = app.oneshot(get_with_cookie("/health/ready", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
fn test_unknown_password_scheme_is_rejected() {
    let mut config = AppConfig::default();
    config.password.scheme = "md5".to_string();
    let store = Arc::new(InMemoryStore::new());
    assert!(AppState::new(config, store.clone(), store.clone(), store).is_err());
}
