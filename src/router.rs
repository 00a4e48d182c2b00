use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use axum::{Json, Router, middleware, routing::get};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;

use pokeapi_config::CorsConfig;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::auth::router::init_auth_router;
use crate::modules::pokemons::router::init_pokemons_router;
use crate::modules::products::router::init_products_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

pub const API_PREFIX: &str = "/api/v1";

pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_LENGTH])
        .max_age(Duration::from_secs(12 * 60 * 60));

    // Credentials cannot be combined with a wildcard origin.
    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    layer.allow_origin(allowed_origins).allow_credentials(true)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn init_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(init_auth_router(&state))
        .merge(init_users_router(&state))
        .merge(init_products_router(&state))
        .merge(init_pokemons_router(&state));

    Router::new()
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest(API_PREFIX, api)
        .with_state(state.clone())
        .layer(cors_layer(&state.cors_config))
        .layer(middleware::from_fn(logging_middleware))
}
