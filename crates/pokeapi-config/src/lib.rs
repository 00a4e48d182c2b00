//! # PokeAPI Config
//!
//! Configuration types loaded once at startup from environment variables and
//! treated as read-only afterwards:
//!
//! - [`jwt`]: Token signing secret and lifetime
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: Listen address
//!
//! Each type splits parsing (`from_values`) from environment access
//! (`from_env`) so parsing rules can be tested without touching the process
//! environment.
//!
//! # Example
//!
//! ```ignore
//! use pokeapi_config::{CorsConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
