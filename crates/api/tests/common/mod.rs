//! Shared test harness: builds the real application router (same middleware
//! stack as `main.rs`) against a per-test database pool, plus small
//! request/response helpers for `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::util::ServiceExt;

use harmonia_api::auth::jwt::JwtConfig;
use harmonia_api::auth::password::hash_password;
use harmonia_api::config::ServerConfig;
use harmonia_api::notifications::Notifier;
use harmonia_api::router::build_app_router;
use harmonia_api::state::AppState;
use harmonia_core::cache::SnapshotCache;
use harmonia_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        checkout_base_url: "https://pay.example.com/checkout".to_string(),
        snapshot_cache_path: std::env::temp_dir()
            .join(format!("harmonia-test-cache-{}.json", uuid::Uuid::new_v4()))
            .to_string_lossy()
            .into_owned(),
        dispatch_interval_secs: 60,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and a fresh snapshot cache file.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let cache = Arc::new(SnapshotCache::open(&config.snapshot_cache_path));
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        cache,
        notifier: Notifier::new(pool),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, "GET", uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, "GET", uri, None, Some(token)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, "POST", uri, Some(body), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, "POST", uri, Some(body), Some(token)).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response {
    send(app, "POST", uri, None, None).await
}

pub async fn post_empty_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, "POST", uri, None, Some(token)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, "PUT", uri, Some(body), Some(token)).await
}

pub async fn put_empty_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, "PUT", uri, None, Some(token)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, "DELETE", uri, None, Some(token)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
}

// ---------------------------------------------------------------------------
// Auth helpers
// ---------------------------------------------------------------------------

pub const TEST_PASSWORD: &str = "test_password_123!";

/// Create a user with the given role directly in the database.
pub async fn create_user(pool: &PgPool, username: &str, role: &str) {
    let hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    UserRepo::create(pool, username, &hash, role)
        .await
        .expect("user creation should succeed");
}

/// Log in via the API and return the access token.
pub async fn login(app: Router, username: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["access_token"].as_str().unwrap().to_string()
}

/// Create an admin user and return a valid access token for it.
pub async fn admin_token(pool: &PgPool, app: Router) -> String {
    create_user(pool, "admin", "admin").await;
    login(app, "admin").await
}
