use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Identity payload embedded in an issued token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id)
    pub sub: i64,
    /// Expiration time (unix seconds)
    pub exp: i64,
    /// Issued at (unix seconds)
    pub iat: i64,
    pub username: String,
}

/// Signs and verifies bearer tokens with a shared symmetric secret.
///
/// Stateless: expiry is the only lifecycle bound, there is no
/// revocation list.
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_hours: i64,
}

impl JwtService {
    pub fn new(secret: &[u8], ttl_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl_hours,
        }
    }

    /// Issue a signed token carrying the user's id and username
    pub fn issue(&self, user_id: i64, username: &str) -> Result<String> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.ttl_hours);

        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            username: username.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))
    }

    /// Verify a token and return its claims.
    ///
    /// Fails with one uniform error for a bad signature, a malformed
    /// token, and an expired token alike; callers cannot tell which.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|_| anyhow::anyhow!("Invalid or expired token"))?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> JwtService {
        JwtService::new(b"test_secret_key_for_testing_purposes_only", 10)
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = create_test_service();

        let token = service.issue(42, "alice").expect("Token issuance should succeed");
        assert!(!token.is_empty());

        let claims = service.verify(&token).expect("Valid token should verify");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_malformed_token_fails() {
        let service = create_test_service();

        let result = service.verify("invalid.token.string");
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret_fails() {
        let service = create_test_service();
        let other = JwtService::new(b"a_completely_different_secret", 10);

        let token = service.issue(1, "alice").expect("Token issuance should succeed");
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_fails_with_same_error_shape() {
        let service = create_test_service();

        // Encode claims that expired an hour ago
        let now = Utc::now();
        let claims = Claims {
            sub: 1,
            iat: now.timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
            username: "alice".to_string(),
        };
        let token = encode(&Header::default(), &claims, &service.encoding_key)
            .expect("Failed to encode token");

        let expired = service.verify(&token).expect_err("Expired token should fail");
        let malformed = service
            .verify("invalid.token.string")
            .expect_err("Malformed token should fail");
        assert_eq!(
            expired.to_string(),
            malformed.to_string(),
            "Verification failures must be indistinguishable"
        );
    }
}
