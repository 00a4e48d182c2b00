use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;

use pokeapi_auth::{Role, RoleRanking, TokenService};
use pokeapi_config::{CorsConfig, JwtConfig};
use pokeapi_db::{database_url_from_env, init_db_pool};

use crate::middleware::role::RoleGate;

/// Shared, read-only application state. Built once in `main` and cloned into
/// every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub tokens: Arc<TokenService>,
    pub roles: Arc<RoleRanking>,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(db: PgPool, jwt_config: &JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            db,
            tokens: Arc::new(TokenService::new(jwt_config)),
            roles: Arc::new(RoleRanking::default()),
            cors_config,
        }
    }

    pub fn role_gate(&self, required: Role) -> RoleGate {
        RoleGate::new(required, self.roles.clone())
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let database_url = database_url_from_env()?;
    let db = init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")?;

    Ok(AppState::new(
        db,
        &JwtConfig::from_env(),
        CorsConfig::from_env(),
    ))
}
