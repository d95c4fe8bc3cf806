use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, Result};

pub const TOKEN_TTL_DAYS: i64 = 7;

/// Claims embedded in self-issued session tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user ID (hex ObjectId).
    pub sub: String,
    /// User email. Informational; only `sub` is trusted downstream.
    pub email: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiry (unix timestamp).
    pub exp: i64,
}

/// Issues and verifies HS256 session tokens against the server-held secret.
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }

    /// Issue a session token with a 7-day expiry.
    pub fn issue(&self, user_id: &str, email: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + chrono::Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::Token(e.to_string()))
    }

    /// Verify signature and expiry. Any failure collapses to
    /// `Unauthenticated`; the caller learns nothing about which check failed.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let signer = TokenSigner::new("test-secret");
        let token = signer.issue("507f1f77bcf86cd799439011", "a@b.com").unwrap();

        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims.sub, "507f1f77bcf86cd799439011");
        assert_eq!(claims.email, "a@b.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_is_unauthenticated() {
        let signer = TokenSigner::new("test-secret");
        let other = TokenSigner::new("other-secret");
        let token = signer.issue("507f1f77bcf86cd799439011", "a@b.com").unwrap();

        assert!(matches!(
            other.verify(&token),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn test_expired_token_is_unauthenticated() {
        let signer = TokenSigner::new("test-secret");
        let now = Utc::now();
        let claims = Claims {
            sub: "507f1f77bcf86cd799439011".to_string(),
            email: "a@b.com".to_string(),
            iat: now.timestamp() - 600,
            // Past the default leeway.
            exp: now.timestamp() - 300,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(
            signer.verify(&token),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn test_garbage_token_is_unauthenticated() {
        let signer = TokenSigner::new("test-secret");
        assert!(matches!(
            signer.verify("not-a-token"),
            Err(AuthError::Unauthenticated)
        ));
    }
}
