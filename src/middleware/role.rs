//! Authorization Gate.
//!
//! Parameterized at route registration with the minimum role a route needs.
//! The check is a single rank comparison, so a higher role passes every lower
//! requirement and there is no way to express orthogonal permissions.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::json;
use tracing::debug;

use pokeapi_auth::{Role, RoleRanking};
use pokeapi_core::AppError;

use crate::middleware::auth::AuthContext;

#[derive(Debug, Clone)]
pub struct RoleGate {
    pub required: Role,
    pub ranking: Arc<RoleRanking>,
}

impl RoleGate {
    pub fn new(required: Role, ranking: Arc<RoleRanking>) -> Self {
        Self { required, ranking }
    }

    pub fn check(&self, context: Option<&AuthContext>) -> Result<(), AppError> {
        let Some(context) = context else {
            return Err(AppError::forbidden("Forbidden: Missing role"));
        };

        if !self.ranking.satisfies(&context.role, self.required) {
            debug!(
                required = %self.required,
                role = %context.role,
                "Insufficient role for route"
            );
            return Err(
                AppError::forbidden("Forbidden: Insufficient permissions").with_data(json!({
                    "requiredRole": self.required.as_str(),
                    "userRole": context.role,
                })),
            );
        }

        Ok(())
    }
}

pub async fn authorize(
    State(gate): State<RoleGate>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    gate.check(req.extensions().get::<AuthContext>())?;
    Ok(next.run(req).await)
}
