pub mod auth;
pub mod pokemons;
pub mod products;
pub mod users;

pub use self::auth::model::LoginRequest;
pub use self::users::model::User;

use serde::Deserialize;
use utoipa::IntoParams;

/// `?id=` selector used by the single-row endpoints.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    pub id: i64,
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
