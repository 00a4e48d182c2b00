//! Request gates.
//!
//! - [`auth`]: Authentication Gate. Verifies the bearer token and attaches an
//!   [`auth::AuthContext`] to the request.
//! - [`role`]: Authorization Gate. Compares the context's role against a
//!   required role using the rank table.
//!
//! Gates are attached with `route_layer`, so unmatched paths still 404 instead
//! of 401. Layers added later run first, which is why [`require_role`] adds
//! the Authorization Gate before the Authentication Gate.
//!
//! # Example
//!
//! ```ignore
//! let products = require_role(
//!     Router::new().route("/products", get(get_products)),
//!     state.tokens.clone(),
//!     state.role_gate(Role::User),
//! );
//! ```

pub mod auth;
pub mod role;

use std::sync::Arc;

use axum::{Router, middleware::from_fn_with_state};
use pokeapi_auth::TokenService;

use self::auth::authenticate;
use self::role::{RoleGate, authorize};

/// Requires a valid token on every route of `router`.
pub fn require_auth<S>(router: Router<S>, tokens: Arc<TokenService>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(from_fn_with_state(tokens, authenticate))
}

/// Requires a valid token whose role ranks at least `gate.required`.
pub fn require_role<S>(router: Router<S>, tokens: Arc<TokenService>, gate: RoleGate) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    require_auth(router.route_layer(from_fn_with_state(gate, authorize)), tokens)
}
