use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{login_user, me, register_user};
use crate::middleware::require_auth;
use crate::state::AppState;

pub fn init_auth_router(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/login", post(login_user))
        .route("/register", post(register_user));

    let session = require_auth(Router::new().route("/me", get(me)), state.tokens.clone());

    public.merge(session)
}
