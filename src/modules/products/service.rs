use anyhow::{Context, anyhow};
use sqlx::PgPool;
use tracing::instrument;

use pokeapi_core::{AppError, PaginationState, QueryParams};
use pokeapi_db::list_rows;

use super::model::{CreateProductDto, PRODUCT_LIST, Product, UpdateProductDto};

fn not_found() -> AppError {
    AppError::not_found(anyhow!("Product not found"))
}

pub struct ProductService;

impl ProductService {
    #[instrument(skip(db))]
    pub async fn list_products(
        db: &PgPool,
        params: &QueryParams,
    ) -> Result<(Vec<Product>, PaginationState), AppError> {
        list_rows::<Product>(db, &PRODUCT_LIST, params)
            .await
            .context("Failed to fetch products")
            .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_product(db: &PgPool, id: i64) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            "SELECT id, name, price, created_at, updated_at FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch product by ID")
        .map_err(AppError::database)?
        .ok_or_else(not_found)
    }

    #[instrument(skip(db))]
    pub async fn create_product(db: &PgPool, dto: CreateProductDto) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price)
            VALUES ($1, $2)
            RETURNING id, name, price, created_at, updated_at
            "#,
        )
        .bind(&dto.name)
        .bind(dto.price)
        .fetch_one(db)
        .await
        .context("Failed to insert product")
        .map_err(AppError::database)?;

        Ok(product)
    }

    #[instrument(skip(db))]
    pub async fn update_product(
        db: &PgPool,
        id: i64,
        dto: UpdateProductDto,
    ) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = COALESCE($1, name),
                price = COALESCE($2, price),
                updated_at = NOW()
            WHERE id = $3
            RETURNING id, name, price, created_at, updated_at
            "#,
        )
        .bind(dto.name)
        .bind(dto.price)
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to update product")
        .map_err(AppError::database)?
        .ok_or_else(not_found)
    }

    #[instrument(skip(db))]
    pub async fn delete_product(db: &PgPool, id: i64) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            "DELETE FROM products WHERE id = $1 RETURNING id, name, price, created_at, updated_at",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to delete product")
        .map_err(AppError::database)?
        .ok_or_else(not_found)
    }
}
