use axum::extract::State;
use tracing::instrument;

use pokeapi_core::{ApiResponse, AppError};

use super::model::{LoginRequest, LoginResponse, RegisterRequest};
use super::service::AuthService;
use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthContext;
use crate::modules::users::model::User;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a new account with role `user`
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = User),
        (status = 409, description = "Email already used", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<ApiResponse<User>, AppError> {
    let user = AuthService::register(&state.db, dto).await?;
    Ok(ApiResponse::created("User created", user))
}

/// Login and receive a session token
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Token could not be issued", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<ApiResponse<LoginResponse>, AppError> {
    let response = AuthService::login(&state.db, &state.tokens, dto).await?;
    Ok(ApiResponse::ok("Success to generate token", response))
}

/// Identity carried by the presented token
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Authenticated identity", body = AuthContext),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
pub async fn me(auth: AuthContext) -> ApiResponse<AuthContext> {
    ApiResponse::ok("Authenticated user", auth)
}
