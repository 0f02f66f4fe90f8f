//! JWT token generation and validation
//!
//! Session tokens are stateless HS256 JWTs carrying the user id, email and
//! zodiac sign. Keys are derived once and shared through application state.

use anyhow::Result;
use chrono::{Duration, Utc};
use horoscope_shared::ZodiacSign;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Session token lifetime: 24 hours from issuance
pub const TOKEN_LIFETIME_SECS: i64 = 24 * 60 * 60;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    pub zodiac_sign: ZodiacSign,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Pre-computed JWT keys for efficient token operations
#[derive(Clone)]
struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// JWT service for token operations
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
}

impl JwtService {
    /// Create a new JWT service with pre-computed keys
    ///
    /// Call this once at application startup and store in AppState.
    pub fn new(secret: &str) -> Self {
        Self {
            keys: JwtKeys::new(secret),
        }
    }

    /// Issue a session token for a user
    pub fn issue_token(&self, user_id: Uuid, email: &str, zodiac_sign: ZodiacSign) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(TOKEN_LIFETIME_SECS);

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            zodiac_sign,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        self.encode_claims(&claims)
    }

    fn encode_claims(&self, claims: &Claims) -> Result<String> {
        encode(&Header::default(), claims, self.keys.encoding())
            .map_err(|e| anyhow::anyhow!("Failed to generate token: {}", e))
    }

    /// Validate a token and return claims
    ///
    /// Rejects malformed tokens, bad signatures and expired tokens.
    #[inline]
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, self.keys.decoding(), &Validation::default())
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> JwtService {
        JwtService::new("test-secret")
    }

    #[test]
    fn test_issue_and_validate_token() {
        let service = create_test_service();
        let user_id = Uuid::new_v4();

        let token = service
            .issue_token(user_id, "ana@x.com", ZodiacSign::Aries)
            .unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "ana@x.com");
        assert_eq!(claims.zodiac_sign, ZodiacSign::Aries);
    }

    #[test]
    fn test_token_expires_after_24_hours() {
        let service = create_test_service();
        let token = service
            .issue_token(Uuid::new_v4(), "ana@x.com", ZodiacSign::Leo)
            .unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, TOKEN_LIFETIME_SECS);
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = create_test_service();
        let issued = Utc::now() - Duration::hours(48);
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "old@x.com".to_string(),
            zodiac_sign: ZodiacSign::Virgo,
            iat: issued.timestamp(),
            exp: (issued + Duration::seconds(TOKEN_LIFETIME_SECS)).timestamp(),
        };
        let token = service.encode_claims(&claims).unwrap();

        assert!(service.validate_token(&token).is_err());
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let service = create_test_service();
        let other = JwtService::new("another-secret");
        let token = other
            .issue_token(Uuid::new_v4(), "ana@x.com", ZodiacSign::Aries)
            .unwrap();

        assert!(service.validate_token(&token).is_err());
    }

    #[test]
    fn test_invalid_token_rejected() {
        let service = create_test_service();
        let result = service.validate_token("invalid.token.here");

        assert!(result.is_err());
    }

    #[test]
    fn test_service_is_clone_cheap() {
        let service = create_test_service();
        let _cloned = service.clone(); // Should be cheap due to Arc
    }
}
