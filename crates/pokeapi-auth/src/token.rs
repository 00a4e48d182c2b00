//! Session token issuance and verification.
//!
//! Tokens are HS256 JWTs over [`Claims`]. Verification always checks the
//! signature first and the expiry second, against the injected [`Clock`]
//! rather than the library's own notion of "now".

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use thiserror::Error;

use pokeapi_config::JwtConfig;
use pokeapi_config::jwt::DEFAULT_EXPIRES_IN_HOURS;

use crate::claims::Claims;
use crate::clock::{Clock, SystemClock};

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature does not match")]
    SignatureInvalid,
    #[error("token has expired")]
    Expired,
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
    #[error("token lifetime puts expiry out of range")]
    ExpiryOutOfRange,
}

/// A freshly signed token together with the expiry baked into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    lifetime: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("lifetime", &self.lifetime)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &JwtConfig, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is compared against `clock` after the signature check.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);

        let lifetime = TimeDelta::try_hours(config.expires_in_hours)
            .filter(|d| *d > TimeDelta::zero())
            .unwrap_or_else(|| TimeDelta::hours(DEFAULT_EXPIRES_IN_HOURS));

        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            lifetime,
            clock,
        }
    }

    pub fn lifetime(&self) -> TimeDelta {
        self.lifetime
    }

    pub fn issue(&self, identity: &str, role: &str) -> Result<IssuedToken, TokenError> {
        let now = self.clock.now();
        let expires_at = now
            .checked_add_signed(self.lifetime)
            .ok_or(TokenError::ExpiryOutOfRange)?;

        let claims = Claims {
            email: identity.to_string(),
            role: role.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Signing)?;

        Ok(IssuedToken { token, expires_at })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                _ => TokenError::Malformed,
            })?;

        if claims.is_expired_at(self.clock.now()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn test_config() -> JwtConfig {
        JwtConfig::new("test-secret-key-at-least-32-characters-long", 1)
    }

    fn at(ts: i64) -> Arc<dyn Clock> {
        Arc::new(FixedClock(DateTime::from_timestamp(ts, 0).unwrap()))
    }

    #[test]
    fn test_issue_then_verify_round_trip() {
        let service = TokenService::new(&test_config());
        for (identity, role) in [
            ("ash@example.com", "user"),
            ("brock@example.com", "manager"),
            ("oak@example.com", "admin"),
            ("team@rocket.org", "villain"),
        ] {
            let issued = service.issue(identity, role).unwrap();
            let claims = service.verify(&issued.token).unwrap();
            assert_eq!(claims.email, identity);
            assert_eq!(claims.role, role);
            assert_eq!(claims.exp, issued.expires_at.timestamp());
        }
    }

    #[test]
    fn test_default_lifetime_is_one_hour() {
        let config = JwtConfig::from_values(Some("secret".to_string()), None);
        let service = TokenService::with_clock(&config, at(1_000_000));
        let issued = service.issue("ash@example.com", "user").unwrap();

        assert_eq!(service.lifetime(), TimeDelta::hours(1));
        assert_eq!(issued.expires_at.timestamp(), 1_000_000 + 3600);
    }

    #[test]
    fn test_unrepresentable_expiry_is_an_error() {
        let config = JwtConfig::new("secret", 2_000_000_000_000);
        let service = TokenService::with_clock(&config, at(1_000_000));

        assert!(matches!(
            service.issue("ash@example.com", "user"),
            Err(TokenError::ExpiryOutOfRange)
        ));
    }

    #[test]
    fn test_valid_until_expiry_then_expired() {
        let config = test_config();
        let issued = TokenService::with_clock(&config, at(1_000_000))
            .issue("ash@example.com", "user")
            .unwrap();

        let at_expiry = TokenService::with_clock(&config, at(1_000_000 + 3600));
        assert!(at_expiry.verify(&issued.token).is_ok());

        let after = TokenService::with_clock(&config, at(1_000_000 + 3601));
        assert!(matches!(after.verify(&issued.token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_wrong_secret_is_signature_error() {
        let issued = TokenService::new(&test_config())
            .issue("ash@example.com", "admin")
            .unwrap();
        let other = TokenService::new(&JwtConfig::new("different-secret-key-entirely", 1));

        assert!(matches!(
            other.verify(&issued.token),
            Err(TokenError::SignatureInvalid)
        ));
    }

    #[test]
    fn test_signature_checked_before_expiry() {
        let issued = TokenService::with_clock(&test_config(), at(1_000))
            .issue("ash@example.com", "user")
            .unwrap();
        let other = TokenService::new(&JwtConfig::new("different-secret-key-entirely", 1));

        assert!(matches!(
            other.verify(&issued.token),
            Err(TokenError::SignatureInvalid)
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let service = TokenService::new(&test_config());
        for raw in ["", "invalid-token", "a.b.c", "Bearer x.y.z"] {
            assert!(
                matches!(service.verify(raw), Err(TokenError::Malformed)),
                "input {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_payload_without_role_is_malformed() {
        #[derive(serde::Serialize)]
        struct Partial {
            email: String,
            exp: i64,
        }

        let config = test_config();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &Partial {
                email: "ash@example.com".to_string(),
                exp: Utc::now().timestamp() + 600,
            },
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        let service = TokenService::new(&config);
        assert!(matches!(service.verify(&token), Err(TokenError::Malformed)));
    }
}
