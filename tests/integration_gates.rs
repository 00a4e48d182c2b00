//! Authentication and Authorization gates driven through a small router,
//! without a database.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, TimeDelta, Utc};
use http_body_util::BodyExt;
use pokeapi::middleware::auth::AuthContext;
use pokeapi::middleware::role::{RoleGate, authorize};
use pokeapi::middleware::{require_auth, require_role};
use pokeapi::router::cors_layer;
use pokeapi_auth::{FixedClock, Role, RoleRanking, TokenService};
use pokeapi_config::{CorsConfig, JwtConfig};
use serde_json::Value;
use tower::ServiceExt;

const SECRET: &str = "gate-test-secret-at-least-32-characters";

fn tokens() -> Arc<TokenService> {
    Arc::new(TokenService::new(&JwtConfig::new(SECRET, 1)))
}

fn gate(required: Role) -> RoleGate {
    RoleGate::new(required, Arc::new(RoleRanking::default()))
}

async fn whoami(auth: AuthContext) -> Json<AuthContext> {
    Json(auth)
}

fn app(required: Role) -> Router {
    require_role(
        Router::new().route("/protected", get(whoami)),
        tokens(),
        gate(required),
    )
}

fn token(role: &str) -> String {
    tokens().issue("ash@example.com", role).unwrap().token
}

fn request(authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri("/protected");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(router: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_missing_header_is_unauthenticated() {
    let (status, body) = send(app(Role::User), request(None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], 401);
    assert_eq!(body["message"], "Missing or invalid token");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_wrong_scheme_is_unauthenticated() {
    let (status, body) = send(app(Role::User), request(Some("Basic dXNlcjpwYXNz"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Missing or invalid token");
}

#[tokio::test]
async fn test_verification_failures_look_identical() {
    let expired = TokenService::with_clock(
        &JwtConfig::new(SECRET, 1),
        Arc::new(FixedClock(Utc::now() - TimeDelta::hours(3))),
    )
    .issue("ash@example.com", "admin")
    .unwrap()
    .token;

    let foreign = TokenService::new(&JwtConfig::new("someone-elses-secret-entirely", 1))
        .issue("ash@example.com", "admin")
        .unwrap()
        .token;

    for bad in ["garbage".to_string(), expired, foreign] {
        let (status, body) = send(
            app(Role::User),
            request(Some(&format!("Bearer {}", bad))),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid token");
        assert!(body["data"].is_null());
    }
}

#[tokio::test]
async fn test_sufficient_role_reaches_handler_with_context() {
    let (status, body) = send(
        app(Role::Manager),
        request(Some(&format!("Bearer {}", token("admin")))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ash@example.com");
    assert_eq!(body["role"], "admin");
}

#[tokio::test]
async fn test_every_role_pair_follows_rank_order() {
    for caller in Role::ALL {
        for required in Role::ALL {
            let (status, _) = send(
                app(required),
                request(Some(&format!("Bearer {}", token(caller.as_str())))),
            )
            .await;
            let expected = if caller.rank() >= required.rank() {
                StatusCode::OK
            } else {
                StatusCode::FORBIDDEN
            };
            assert_eq!(status, expected, "{} on {} route", caller, required);
        }
    }
}

#[tokio::test]
async fn test_insufficient_role_echoes_roles() {
    let (status, body) = send(
        app(Role::Admin),
        request(Some(&format!("Bearer {}", token("user")))),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Forbidden: Insufficient permissions");
    assert_eq!(body["data"]["requiredRole"], "admin");
    assert_eq!(body["data"]["userRole"], "user");
    assert!(!body.to_string().contains(&token("user")));
}

#[tokio::test]
async fn test_unknown_role_is_forbidden() {
    let (status, body) = send(
        app(Role::User),
        request(Some(&format!("Bearer {}", token("trainer")))),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["data"]["userRole"], "trainer");
}

#[tokio::test]
async fn test_authorize_without_authenticate_is_structured_denial() {
    let router = Router::new()
        .route("/protected", get(|| async { "ok" }))
        .route_layer(from_fn_with_state(gate(Role::User), authorize));

    let (status, body) = send(router, request(None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Forbidden: Missing role");
}

#[tokio::test]
async fn test_require_auth_accepts_any_role() {
    let router = require_auth(Router::new().route("/protected", get(whoami)), tokens());
    let (status, body) = send(router, request(Some(&format!("Bearer {}", token("trainer"))))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "trainer");
}

#[tokio::test]
async fn test_unmatched_path_is_not_gated() {
    let req = Request::builder().uri("/nowhere").body(Body::empty()).unwrap();
    let response = app(Role::Admin).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_token_expiry_defaults_to_one_hour() {
    let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
    let service = TokenService::with_clock(
        &JwtConfig::from_values(Some(SECRET.to_string()), None),
        Arc::new(FixedClock(now)),
    );
    let issued = service.issue("ash@example.com", "user").unwrap();
    assert_eq!(issued.expires_at - now, TimeDelta::hours(1));
}

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method("OPTIONS")
        .uri("/protected")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_cors_wildcard_without_credentials() {
    let router = app(Role::User).layer(cors_layer(&CorsConfig::from_value(Some("*"))));
    let response = router.oneshot(preflight("https://pokedex.dev")).await.unwrap();

    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
    assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "43200");
}

#[tokio::test]
async fn test_cors_explicit_origin_with_credentials() {
    let config = CorsConfig::from_value(Some("https://pokedex.dev"));
    let router = app(Role::User).layer(cors_layer(&config));
    let response = router.oneshot(preflight("https://pokedex.dev")).await.unwrap();

    let headers = response.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://pokedex.dev"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}
