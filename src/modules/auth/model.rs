use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Format of `activeUntil` in the login reply.
pub const ACTIVE_UNTIL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub username: String,
    pub email: String,
    /// Token expiry, `YYYY-MM-DD HH:MM:SS` in UTC
    pub active_until: String,
    pub token: String,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 3, message = "name must be at least 3 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

/// The row login needs, including the stored hash. Never serialized.
#[derive(FromRow, Clone)]
pub struct UserCredentials {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl std::fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCredentials")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}
