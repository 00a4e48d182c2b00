use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use pokeapi_auth::TokenService;
use pokeapi_core::AppError;

pub const BEARER_PREFIX: &str = "Bearer ";

/// Identity attached to a request by [`authenticate`]. Lives for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuthContext {
    pub email: String,
    pub role: String,
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
}

/// Authentication Gate.
///
/// Missing header, wrong scheme and every verification failure all halt
/// with the same 401 so callers learn nothing about why a token was refused.
pub async fn authenticate(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| AppError::unauthorized("Missing or invalid token"))?;

    let claims = tokens.verify(token).map_err(|e| {
        debug!(reason = %e, "Rejected bearer token");
        AppError::unauthorized("Invalid token")
    })?;

    req.extensions_mut().insert(AuthContext {
        email: claims.email,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Missing or invalid token"))
    }
}
