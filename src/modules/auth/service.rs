use anyhow::Context;
use sqlx::PgPool;
use tracing::{info, instrument};

use pokeapi_auth::{IssuedToken, Role, TokenService};
use pokeapi_core::{AppError, verify_password};

use super::model::{
    ACTIVE_UNTIL_FORMAT, LoginRequest, LoginResponse, RegisterRequest, UserCredentials,
};
use crate::modules::users::model::{CreateUserDto, User};
use crate::modules::users::service::UserService;

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid email or password")
}

pub(crate) fn login_response(user: UserCredentials, issued: IssuedToken) -> LoginResponse {
    LoginResponse {
        username: user.name,
        email: user.email,
        active_until: issued.expires_at.format(ACTIVE_UNTIL_FORMAT).to_string(),
        token: issued.token,
    }
}

pub struct AuthService;

impl AuthService {
    /// Looks the account up by email and verifies the password against the
    /// stored bcrypt hash before issuing a token.
    #[instrument(skip(db, tokens, dto), fields(email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        tokens: &TokenService,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let user = sqlx::query_as::<_, UserCredentials>(
            "SELECT name, email, password, role FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by email")
        .map_err(AppError::database)?
        .ok_or_else(invalid_credentials)?;

        if !verify_password(&dto.password, &user.password)? {
            return Err(invalid_credentials());
        }

        let issued = tokens
            .issue(&user.email, &user.role)
            .context("Failed to generate token")
            .map_err(AppError::internal)?;

        info!(role = %user.role, "User logged in");
        Ok(login_response(user, issued))
    }

    /// Self-registration always yields the lowest role.
    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn register(db: &PgPool, dto: RegisterRequest) -> Result<User, AppError> {
        UserService::create_user(
            db,
            CreateUserDto {
                name: dto.name,
                email: dto.email,
                password: dto.password,
                role: Role::User,
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_login_response_formats_expiry() {
        let user = UserCredentials {
            name: "Ash Ketchum".to_string(),
            email: "ash@example.com".to_string(),
            password: "$2b$12$hash".to_string(),
            role: "user".to_string(),
        };
        let issued = IssuedToken {
            token: "header.payload.signature".to_string(),
            expires_at: DateTime::from_timestamp(1_718_000_000, 0).unwrap(),
        };

        let response = login_response(user, issued);
        assert_eq!(response.username, "Ash Ketchum");
        assert_eq!(response.active_until, "2024-06-10 06:13:20");

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["activeUntil"], "2024-06-10 06:13:20");
        assert_eq!(value["token"], "header.payload.signature");
    }

    #[test]
    fn test_invalid_credentials_message_is_uniform() {
        let err = invalid_credentials();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
        assert_eq!(err.error.to_string(), "Invalid email or password");
    }
}
