use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Session claims embedded in every token.
///
/// `role` stays a plain string: a token minted with a role name outside the
/// known set still verifies, it simply ranks lowest at the Authorization Gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Subject identity (the user's email)
    pub email: String,
    pub role: String,
    /// Expiry as a Unix timestamp in seconds
    pub exp: i64,
    /// Issued-at as a Unix timestamp in seconds
    pub iat: i64,
}

impl Claims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Validity is a pure function of time: expired once `now` passes `exp`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(exp: i64) -> Claims {
        Claims {
            email: "misty@example.com".to_string(),
            role: "user".to_string(),
            exp,
            iat: exp - 3600,
        }
    }

    #[test]
    fn test_expiry_boundary() {
        let c = claims(1_700_000_000);
        let at = |ts| DateTime::from_timestamp(ts, 0).unwrap();

        assert!(!c.is_expired_at(at(1_699_999_999)));
        assert!(!c.is_expired_at(at(1_700_000_000)));
        assert!(c.is_expired_at(at(1_700_000_001)));
    }

    #[test]
    fn test_serialized_keys() {
        let value = serde_json::to_value(claims(100)).unwrap();
        assert_eq!(value["email"], "misty@example.com");
        assert_eq!(value["role"], "user");
        assert_eq!(value["exp"], 100);
        assert_eq!(value["iat"], -3500);
    }
}
