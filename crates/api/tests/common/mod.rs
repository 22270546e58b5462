#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use realty_api::auth::jwt::{generate_access_token, JwtConfig};
use realty_api::config::ServerConfig;
use realty_api::router::build_app_router;
use realty_api::state::AppState;
use realty_core::booking::BusinessHours;
use realty_core::listing::LinkOnlyUploader;
use realty_db::models::property::CreateProperty;
use realty_db::models::user::CreateUser;
use realty_db::repositories::{PropertyRepo, UserRepo};
use sqlx::PgPool;
use tower::ServiceExt;

pub const ADMIN_ROLE_ID: i64 = 1;
pub const AGENT_ROLE_ID: i64 = 2;
pub const BUYER_ROLE_ID: i64 = 3;

/// Build a test `ServerConfig` with safe defaults and default booking hours.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
        booking: BusinessHours::default(),
    }
}

/// Build the full application router, with the production middleware stack,
/// over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        media: Arc::new(LinkOnlyUploader),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// A seeded user and a valid bearer token for them.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: i64,
    pub token: String,
}

pub async fn seed_user(pool: &PgPool, name: &str, role_id: i64) -> TestUser {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: format!("{name}@test.com"),
            role_id,
        },
    )
    .await
    .expect("user creation should succeed");
    let role = match role_id {
        ADMIN_ROLE_ID => "admin",
        AGENT_ROLE_ID => "agent",
        _ => "buyer",
    };
    let token = generate_access_token(user.id, role, &test_config().jwt)
        .expect("token generation should succeed");
    TestUser { id: user.id, token }
}

/// Seed a listing owned by `agent_id` and return its id.
pub async fn seed_property(pool: &PgPool, agent_id: i64) -> i64 {
    PropertyRepo::create(
        pool,
        &CreateProperty {
            agent_id,
            title: "Garden flat".to_string(),
            description: "Quiet street".to_string(),
            price: 1_500.0,
            city: "Lisbon".to_string(),
            property_type: None,
            listing_type: Some("rent".to_string()),
        },
    )
    .await
    .expect("property creation should succeed")
    .id
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");
    app.oneshot(request).await.expect("router should respond")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn put_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), None).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}
