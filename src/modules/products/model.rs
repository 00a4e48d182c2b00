use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use pokeapi_core::filter::{FilterField, FilterKind};
use pokeapi_db::ListSpec;

pub const PRODUCT_COLUMNS: &str = "id, name, price, created_at, updated_at";

pub const PRODUCT_FILTERS: &[FilterField] = &[
    FilterField::new("name", FilterKind::String),
    FilterField::new("price", FilterKind::Integer),
];

pub const PRODUCT_SORTABLE: &[&str] = &["name", "price"];

pub const PRODUCT_LIST: ListSpec = ListSpec {
    table: "products",
    columns: PRODUCT_COLUMNS,
    filters: PRODUCT_FILTERS,
    sortable: PRODUCT_SORTABLE,
};

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateProductDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
}

#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct UpdateProductDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,
}
