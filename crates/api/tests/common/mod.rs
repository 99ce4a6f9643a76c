#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use marquee_api::auth::cookies::CookieConfig;
use marquee_api::auth::jwt::JwtConfig;
use marquee_api::auth::password::hash_password;
use marquee_api::config::ServerConfig;
use marquee_api::router::build_app_router;
use marquee_api::state::AppState;
use marquee_core::identity::{Identity, NewUser};
use marquee_core::store::UserStore;
use marquee_db::MemoryStore;
use tower::ServiceExt;

pub const ACCESS_SECRET: &str = "test-access-secret-0123456789abcdef";
pub const REFRESH_SECRET: &str = "test-refresh-secret-fedcba9876543210";
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and a short store deadline.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_timeout_secs: 2,
        database_url: None,
        jwt: JwtConfig::new(ACCESS_SECRET, REFRESH_SECRET, 15, 7)
            .expect("test JWT config is valid"),
        cookies: CookieConfig::default(),
    }
}

/// Build the full application router over the given in-memory store.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    let config = test_config();
    let state = AppState::new(config.clone(), store.clone(), store);
    build_app_router(state, &config)
}

/// Create a user directly in the store with [`TEST_PASSWORD`].
pub async fn seed_user(store: &MemoryStore, email: &str, role: &str) -> Identity {
    let new_user = NewUser {
        email: email.to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        role: role.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
    };
    store
        .create(&new_user)
        .await
        .expect("user creation should succeed")
        .identity
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send a bodiless request carrying a raw `Cookie` header.
pub async fn with_cookie(app: Router, method: Method, uri: &str, cookie: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// All `Set-Cookie` header values on a response.
pub fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// The full `Set-Cookie` header for the named cookie.
pub fn set_cookie_header(response: &Response, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    set_cookies(response)
        .into_iter()
        .find(|header| header.starts_with(&prefix))
}

/// The value of the named cookie in a `Set-Cookie` header.
pub fn set_cookie_value(response: &Response, name: &str) -> Option<String> {
    let header = set_cookie_header(response, name)?;
    let pair = header.split(';').next()?;
    pair.split_once('=').map(|(_, value)| value.to_string())
}

/// Log in via the API and return the response.
pub async fn login(app: Router, email: &str, password: &str) -> Response {
    post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "email": email, "password": password }),
    )
    .await
}
