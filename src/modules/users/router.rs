use axum::{
    Router,
    routing::{delete, get, post, put},
};

use pokeapi_auth::Role;

use super::controller::{create_user, delete_user, get_user, get_users, update_user};
use crate::middleware::require_role;
use crate::state::AppState;

pub fn init_users_router(state: &AppState) -> Router<AppState> {
    let routes = Router::new()
        .route("/users", get(get_users))
        .route("/user", get(get_user))
        .route("/user/create", post(create_user))
        .route("/user/update", put(update_user))
        .route("/user/delete", delete(delete_user));

    require_role(routes, state.tokens.clone(), state.role_gate(Role::Admin))
}
