//! Session token signing and verification.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AuthConfig;

/// Session token lifetime.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity claim
    pub email: String,
    /// Issued at (seconds since epoch)
    pub iat: i64,
    /// Expiration (seconds since epoch)
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("Failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Issues and verifies HS256 session tokens with a process-wide secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttl(secret, Duration::seconds(TOKEN_TTL_SECS))
    }

    pub fn with_ttl(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.jwt_secret.as_bytes())
    }

    /// Issue a token for `email`, valid from now.
    pub fn issue(&self, email: &str) -> Result<String, TokenError> {
        self.issue_at(email, Utc::now())
    }

    /// Issue a token for `email` as if signed at `issued_at`.
    pub fn issue_at(&self, email: &str, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(TokenError::Signing)
    }

    /// Check signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_before_expiry() {
        let tokens = TokenService::new(b"test-secret");
        let token = tokens.issue("a@x.com").unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn test_rejects_expired_token() {
        let tokens = TokenService::new(b"test-secret");
        let issued_at = Utc::now() - Duration::seconds(TOKEN_TTL_SECS + 5);
        let token = tokens.issue_at("a@x.com", issued_at).unwrap();

        assert!(matches!(tokens.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_valid_until_just_before_expiry() {
        let tokens = TokenService::new(b"test-secret");
        let issued_at = Utc::now() - Duration::seconds(TOKEN_TTL_SECS - 30);
        let token = tokens.issue_at("a@x.com", issued_at).unwrap();

        assert!(tokens.verify(&token).is_ok());
    }

    #[test]
    fn test_rejects_foreign_signature() {
        let ours = TokenService::new(b"test-secret");
        let theirs = TokenService::new(b"other-secret");
        let token = theirs.issue("a@x.com").unwrap();

        assert!(ours.verify(&token).is_err());
        assert!(ours.verify("not.a.token").is_err());
        assert!(ours.verify("").is_err());
    }
}
