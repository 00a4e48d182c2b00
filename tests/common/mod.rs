#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use http_body_util::BodyExt;
use pokeapi::router::init_router;
use pokeapi::state::AppState;
use pokeapi_config::{CorsConfig, JwtConfig};
use pokeapi_core::hash_password;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-chars";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_SECRET, 1)
}

pub fn setup_test_app(pool: PgPool) -> Router {
    let state = AppState::new(pool, &test_jwt_config(), CorsConfig::from_value(Some("*")));
    init_router(state)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Inserts a user directly, bypassing registration so any role can be used.
pub async fn create_test_user(pool: &PgPool, email: &str, password: &str, role: &str) -> i64 {
    let hashed = hash_password(password).unwrap();

    sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (name, email, password, role) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind("Test User")
    .bind(email)
    .bind(hashed)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn delete_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/login",
            None,
            json!({ "email": email, "password": password }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    body["data"]["token"].as_str().unwrap().to_string()
}

/// Creates a user with `role` and returns a token for it.
pub async fn token_for_role(pool: &PgPool, app: &Router, role: &str) -> String {
    let email = generate_unique_email();
    create_test_user(pool, &email, "password123", role).await;
    login(app, &email, "password123").await
}
