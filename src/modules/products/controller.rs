use anyhow::anyhow;
use axum::extract::{Query, State};
use tracing::instrument;

use pokeapi_core::{ApiResponse, AppError, DataResponse, QueryParams};

use super::model::{CreateProductDto, Product, UpdateProductDto};
use super::service::ProductService;
use crate::docs::ErrorResponse;
use crate::modules::IdQuery;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedQuery};

/// List products
#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(
        ("page" = Option<i64>, Query, description = "Page number (default 1)"),
        ("limit" = Option<i64>, Query, description = "Page size (default 10)"),
        ("name" = Option<String>, Query, description = "Substring match on name"),
        ("price" = Option<i64>, Query, description = "Exact price"),
        ("sort_by" = Option<String>, Query, description = "name or price"),
        ("order" = Option<String>, Query, description = "asc (default) or desc"),
    ),
    responses(
        (status = 200, description = "Page of products", body = [Product]),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No products matched", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<ApiResponse<DataResponse<Vec<Product>>>, AppError> {
    let (products, pagination) = ProductService::list_products(&state.db, &params).await?;
    if products.is_empty() {
        return Err(AppError::not_found(anyhow!("Products not found")));
    }

    Ok(ApiResponse::ok(
        "Success fetching products data",
        DataResponse::new(&pagination, products),
    ))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/api/v1/product",
    params(IdQuery),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    ValidatedQuery(IdQuery { id }): ValidatedQuery<IdQuery>,
) -> Result<ApiResponse<DataResponse<Product>>, AppError> {
    let product = ProductService::get_product(&state.db, id).await?;
    Ok(ApiResponse::ok(
        "Success fetching product data",
        DataResponse::single(product),
    ))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/api/v1/product/create",
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 403, description = "Requires manager", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
#[instrument(skip(state))]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateProductDto>,
) -> Result<ApiResponse<Product>, AppError> {
    let product = ProductService::create_product(&state.db, dto).await?;
    Ok(ApiResponse::created("Product created", product))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/api/v1/product/update",
    params(IdQuery),
    request_body = UpdateProductDto,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
#[instrument(skip(state))]
pub async fn update_product(
    State(state): State<AppState>,
    ValidatedQuery(IdQuery { id }): ValidatedQuery<IdQuery>,
    ValidatedJson(dto): ValidatedJson<UpdateProductDto>,
) -> Result<ApiResponse<Product>, AppError> {
    let product = ProductService::update_product(&state.db, id, dto).await?;
    Ok(ApiResponse::ok("Product updated", product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/v1/product/delete",
    params(IdQuery),
    responses(
        (status = 200, description = "Product deleted", body = Product),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    ValidatedQuery(IdQuery { id }): ValidatedQuery<IdQuery>,
) -> Result<ApiResponse<Product>, AppError> {
    let product = ProductService::delete_product(&state.db, id).await?;
    Ok(ApiResponse::ok("Product deleted successfully", product))
}
