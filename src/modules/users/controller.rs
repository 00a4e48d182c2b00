use anyhow::anyhow;
use axum::extract::{Query, State};
use tracing::instrument;

use pokeapi_core::{ApiResponse, AppError, DataResponse, QueryParams};

use super::model::{CreateUserDto, UpdateUserDto, User};
use super::service::UserService;
use crate::docs::ErrorResponse;
use crate::modules::IdQuery;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedQuery};

/// List users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(
        ("page" = Option<i64>, Query, description = "Page number (default 1)"),
        ("limit" = Option<i64>, Query, description = "Page size (default 10)"),
        ("name" = Option<String>, Query, description = "Substring match on name"),
        ("email" = Option<String>, Query, description = "Substring match on email"),
        ("role" = Option<String>, Query, description = "Substring match on role"),
        ("created_from" = Option<String>, Query, description = "Created at or after"),
        ("created_to" = Option<String>, Query, description = "Created at or before"),
        ("sort_by" = Option<String>, Query, description = "name, email, role or created_at"),
        ("order" = Option<String>, Query, description = "asc (default) or desc"),
    ),
    responses(
        (status = 200, description = "Page of users", body = [User]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "No users matched", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<ApiResponse<DataResponse<Vec<User>>>, AppError> {
    let (users, pagination) = UserService::list_users(&state.db, &params).await?;
    if users.is_empty() {
        return Err(AppError::not_found(anyhow!("Users not found")));
    }

    Ok(ApiResponse::ok(
        "Success fetching users data",
        DataResponse::new(&pagination, users),
    ))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/v1/user",
    params(IdQuery),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    ValidatedQuery(IdQuery { id }): ValidatedQuery<IdQuery>,
) -> Result<ApiResponse<DataResponse<User>>, AppError> {
    let user = UserService::get_user(&state.db, id).await?;
    Ok(ApiResponse::ok(
        "Success fetching user data",
        DataResponse::single(user),
    ))
}

/// Create a user with any role
#[utoipa::path(
    post,
    path = "/api/v1/user/create",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 409, description = "Email already used", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<ApiResponse<User>, AppError> {
    let user = UserService::create_user(&state.db, dto).await?;
    Ok(ApiResponse::created("User created", user))
}

/// Update a user's name, email or role
#[utoipa::path(
    put,
    path = "/api/v1/user/update",
    params(IdQuery),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already used", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    ValidatedQuery(IdQuery { id }): ValidatedQuery<IdQuery>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<ApiResponse<User>, AppError> {
    let user = UserService::update_user(&state.db, id, dto).await?;
    Ok(ApiResponse::ok("User updated", user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/v1/user/delete",
    params(IdQuery),
    responses(
        (status = 200, description = "User deleted", body = User),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    ValidatedQuery(IdQuery { id }): ValidatedQuery<IdQuery>,
) -> Result<ApiResponse<User>, AppError> {
    let user = UserService::delete_user(&state.db, id).await?;
    Ok(ApiResponse::ok("User deleted", user))
}
