use axum::{
    Router,
    routing::{delete, get, post, put},
};

use pokeapi_auth::Role;

use super::controller::{
    create_pokemon, delete_pokemon, get_pokemon, get_pokemons, update_pokemon,
};
use crate::middleware::require_role;
use crate::state::AppState;

pub fn init_pokemons_router(state: &AppState) -> Router<AppState> {
    let routes = Router::new()
        .route("/pokemons", get(get_pokemons))
        .route("/pokemon", get(get_pokemon))
        .route("/pokemon/create", post(create_pokemon))
        .route("/pokemon/update", put(update_pokemon))
        .route("/pokemon/delete", delete(delete_pokemon));

    require_role(routes, state.tokens.clone(), state.role_gate(Role::User))
}
