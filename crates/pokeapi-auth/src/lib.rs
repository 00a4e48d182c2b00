//! # PokeAPI Auth
//!
//! Stateless session tokens and the role hierarchy used by the gates.
//!
//! This crate provides:
//!
//! - [`roles`]: The closed role set and its rank table
//! - [`claims`]: The signed payload carried inside a session token
//! - [`clock`]: Time source used for expiry computation and comparison
//! - [`token`]: Token issuance and verification
//!
//! Nothing is stored server-side. A token is valid exactly while its signature
//! matches the configured secret and the clock has not passed its expiry, so a
//! token cannot be revoked before it expires.
//!
//! # Example
//!
//! ```ignore
//! use pokeapi_auth::{Role, TokenService};
//! use pokeapi_config::JwtConfig;
//!
//! let tokens = TokenService::new(&JwtConfig::from_env());
//! let issued = tokens.issue("ash@example.com", Role::User.as_str())?;
//! let claims = tokens.verify(&issued.token)?;
//! assert_eq!(claims.email, "ash@example.com");
//! ```

pub mod claims;
pub mod clock;
pub mod roles;
pub mod token;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use clock::{Clock, FixedClock, SystemClock};
pub use roles::{Role, RoleRanking};
pub use token::{IssuedToken, TokenError, TokenService};
