use axum::{
    Router,
    routing::{delete, get, post, put},
};

use pokeapi_auth::Role;

use super::controller::{
    create_product, delete_product, get_product, get_products, update_product,
};
use crate::middleware::require_role;
use crate::state::AppState;

/// Any user may read the catalogue; changing it needs a manager.
pub fn init_products_router(state: &AppState) -> Router<AppState> {
    let read = Router::new()
        .route("/products", get(get_products))
        .route("/product", get(get_product));

    let write = Router::new()
        .route("/product/create", post(create_product))
        .route("/product/update", put(update_product))
        .route("/product/delete", delete(delete_product));

    require_role(read, state.tokens.clone(), state.role_gate(Role::User)).merge(require_role(
        write,
        state.tokens.clone(),
        state.role_gate(Role::Manager),
    ))
}
