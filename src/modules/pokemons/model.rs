//! Favourite pokemon records.
//!
//! The `type` column is exposed as `type` in JSON but held in [`Pokemon::kind`]
//! since `type` is a Rust keyword.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use pokeapi_core::filter::{FilterField, FilterKind};
use pokeapi_db::ListSpec;

pub const POKEMON_COLUMNS: &str = r#"id, name, "type", notes, sprite, created_at, updated_at"#;

pub const POKEMON_FILTERS: &[FilterField] = &[
    FilterField::new("name", FilterKind::String),
    FilterField::new("type", FilterKind::String),
    FilterField::new("notes", FilterKind::String),
];

pub const POKEMON_SORTABLE: &[&str] = &["name", "type", "notes"];

pub const POKEMON_LIST: ListSpec = ListSpec {
    table: "pokemons",
    columns: POKEMON_COLUMNS,
    filters: POKEMON_FILTERS,
    sortable: POKEMON_SORTABLE,
};

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Pokemon {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub notes: String,
    pub sprite: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreatePokemonDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[validate(length(min = 1, max = 30, message = "notes must be 1 to 30 characters"))]
    pub notes: String,
    #[serde(default)]
    pub sprite: String,
}

#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct UpdatePokemonDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[validate(length(min = 1, max = 30, message = "notes must be 1 to 30 characters"))]
    pub notes: Option<String>,
    pub sprite: Option<String>,
}
