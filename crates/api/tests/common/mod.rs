//! Shared helpers for HTTP-level integration tests.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the
//! router, exercising the same middleware stack production uses.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use forkful_api::config::ServerConfig;
use forkful_api::router::build_app_router;
use forkful_api::state::AppState;
use forkful_db::models::profile::CreateProfile;
use forkful_db::repositories::ProfileRepo;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Register a profile and return its id.
pub async fn new_profile(pool: &PgPool, username: &str) -> i64 {
    ProfileRepo::create(
        pool,
        &CreateProfile {
            username: username.to_string(),
            display_name: format!("User {username}"),
            avatar_url: None,
        },
    )
    .await
    .unwrap()
    .id
}

/// Send a GET request (no identity header).
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a JSON request with the identity header.
async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    user_id: i64,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-user-id", user_id.to_string())
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST with a JSON body as the given user.
pub async fn post_json(
    app: Router,
    uri: &str,
    user_id: i64,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, "POST", uri, user_id, body).await
}

/// Send a PUT with a JSON body as the given user.
pub async fn put_json(
    app: Router,
    uri: &str,
    user_id: i64,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, "PUT", uri, user_id, body).await
}

/// Send a DELETE as the given user.
pub async fn delete(app: Router, uri: &str, user_id: i64) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("x-user-id", user_id.to_string())
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
