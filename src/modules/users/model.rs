//! User data models and DTOs.
//!
//! Rows are always selected through [`USER_COLUMNS`], which leaves out the
//! password hash, so a [`User`] can be serialized as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use pokeapi_auth::Role;
use pokeapi_core::filter::{FilterField, FilterKind};
use pokeapi_db::ListSpec;

pub const USER_COLUMNS: &str = "id, name, email, role, created_at, updated_at";

pub const USER_FILTERS: &[FilterField] = &[
    FilterField::new("name", FilterKind::String),
    FilterField::new("email", FilterKind::String),
    FilterField::new("role", FilterKind::String),
    FilterField::on_column("created_from", "created_at", FilterKind::DateFrom),
    FilterField::on_column("created_to", "created_at", FilterKind::DateTo),
];

pub const USER_SORTABLE: &[&str] = &["name", "email", "role", "created_at"];

pub const USER_LIST: ListSpec = ListSpec {
    table: "users",
    columns: USER_COLUMNS,
    filters: USER_FILTERS,
    sortable: USER_SORTABLE,
};

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 3, message = "name must be at least 3 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    pub role: Role,
}

/// Partial update. Fields left out keep their stored value.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 3, message = "name must be at least 3 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid email"))]
    pub email: Option<String>,
    pub role: Option<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dto_rejects_unknown_role() {
        let result = serde_json::from_value::<CreateUserDto>(serde_json::json!({
            "name": "Gary",
            "email": "gary@example.com",
            "password": "eevee123",
            "role": "champion"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_dto_validates_present_fields_only() {
        let empty = UpdateUserDto::default();
        assert!(empty.validate().is_ok());

        let bad = UpdateUserDto {
            email: Some("nope".to_string()),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_user_serialization_has_no_password() {
        let user = User {
            id: 1,
            name: "Misty".to_string(),
            email: "misty@example.com".to_string(),
            role: "manager".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(user).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["role"], "manager");
    }
}
