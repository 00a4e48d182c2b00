//! Token signing configuration.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: HMAC signing secret. A development default is used (and a
//!   warning logged) when it is unset or empty.
//! - `JWT_EXPIRED_IN`: Token lifetime in whole hours. Unset, non-numeric or
//!   non-positive values fall back to 1 hour.

use std::env;

use tracing::warn;

pub const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";
pub const DEFAULT_EXPIRES_IN_HOURS: i64 = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in hours.
    pub expires_in_hours: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expires_in_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expires_in_hours,
        }
    }

    pub fn from_env() -> Self {
        Self::from_values(
            env::var("JWT_SECRET").ok(),
            env::var("JWT_EXPIRED_IN").ok().as_deref(),
        )
    }

    pub fn from_values(secret: Option<String>, expires_in: Option<&str>) -> Self {
        let secret = match secret {
            Some(s) if !s.is_empty() => s,
            _ => {
                warn!("JWT_SECRET is not set, using the development default");
                DEFAULT_SECRET.to_string()
            }
        };

        let expires_in_hours = match expires_in.map(|v| v.trim().parse::<i64>()) {
            Some(Ok(hours)) if hours > 0 => hours,
            Some(_) => {
                warn!("Invalid JWT_EXPIRED_IN format. Defaulting to 1 hour.");
                DEFAULT_EXPIRES_IN_HOURS
            }
            None => DEFAULT_EXPIRES_IN_HOURS,
        };

        Self {
            secret,
            expires_in_hours,
        }
    }
}
