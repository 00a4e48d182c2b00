use anyhow::{Context, anyhow};
use sqlx::PgPool;
use tracing::instrument;

use pokeapi_core::{AppError, PaginationState, QueryParams, hash_password};
use pokeapi_db::list_rows;

use crate::modules::is_unique_violation;
use crate::modules::users::model::{CreateUserDto, USER_LIST, UpdateUserDto, User};

fn write_error(err: sqlx::Error, context: &'static str) -> AppError {
    if is_unique_violation(&err) {
        return AppError::conflict(anyhow!("User email already used"));
    }
    AppError::database(anyhow::Error::new(err).context(context))
}

fn not_found() -> AppError {
    AppError::not_found(anyhow!("User not found"))
}

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn list_users(
        db: &PgPool,
        params: &QueryParams,
    ) -> Result<(Vec<User>, PaginationState), AppError> {
        list_rows::<User>(db, &USER_LIST, params)
            .await
            .context("Failed to fetch users")
            .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, id: i64) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, role, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by ID")
        .map_err(AppError::database)?
        .ok_or_else(not_found)
    }

    #[instrument(skip(db, dto), fields(email = %dto.email, role = %dto.role))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        let password_hash = hash_password(&dto.password)?;

        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, role, created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&password_hash)
        .bind(dto.role.as_str())
        .fetch_one(db)
        .await
        .map_err(|e| write_error(e, "Failed to insert user"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_user(db: &PgPool, id: i64, dto: UpdateUserDto) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($1, name),
                email = COALESCE($2, email),
                role = COALESCE($3, role),
                updated_at = NOW()
            WHERE id = $4
            RETURNING id, name, email, role, created_at, updated_at
            "#,
        )
        .bind(dto.name)
        .bind(dto.email)
        .bind(dto.role.map(|r| r.as_str()))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| write_error(e, "Failed to update user"))?
        .ok_or_else(not_found)
    }

    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, id: i64) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "DELETE FROM users WHERE id = $1 RETURNING id, name, email, role, created_at, updated_at",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to delete user")
        .map_err(AppError::database)?
        .ok_or_else(not_found)
    }
}
