use chrono::Utc;
use jsonwebtoken::{errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;

use super::claims::Claims;
use crate::error::AppError;
use crate::models::{User, UserRole};

/// Access + refresh token pair returned by login and refresh.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

/// Issues and validates HS256 tokens. Stateless: no revocation list.
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl JwtManager {
    pub fn new(secret: &[u8], access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    /// Issue an access + refresh pair for the given user.
    pub fn issue_pair(&self, user_id: i64, role: UserRole) -> Result<TokenPair, AppError> {
        let access_token = self.issue(user_id, role, "access", self.access_ttl_secs)?;
        let refresh_token = self.issue(user_id, role, "refresh", self.refresh_ttl_secs)?;
        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
            expires_in: self.access_ttl_secs,
        })
    }

    pub fn issue_pair_for(&self, user: &User) -> Result<TokenPair, AppError> {
        self.issue_pair(user.id, user.role)
    }

    fn issue(
        &self,
        user_id: i64,
        role: UserRole,
        token_type: &str,
        ttl_secs: i64,
    ) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            role,
            iat: now,
            exp: now + ttl_secs,
            token_type: token_type.to_string(),
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to sign token: {}", e)))
    }

    /// Validate a token and return its claims. Expired tokens are reported
    /// separately from malformed or tampered ones.
    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::unauthorized("Token has expired"),
                _ => AppError::unauthorized("Invalid token"),
            })?;
        Ok(data.claims)
    }

    /// Validate a refresh token and return the subject user ID. Access
    /// tokens are rejected here even though they share the signing key.
    pub fn validate_refresh(&self, refresh_token: &str) -> Result<i64, AppError> {
        let claims = self.validate(refresh_token)?;
        if !claims.is_refresh() {
            return Err(AppError::unauthorized("Invalid token"));
        }
        claims
            .user_id()
            .ok_or_else(|| AppError::unauthorized("Invalid token"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_jwt() -> JwtManager {
        JwtManager::new(b"test-secret-key-for-testing", 3600, 86400)
    }

    #[test]
    fn issue_and_validate_access_token() {
        let jwt = test_jwt();
        let pair = jwt.issue_pair(1, UserRole::Manager).unwrap();
        assert_eq!(pair.expires_in, 3600);
        assert_eq!(pair.token_type, "bearer");

        let claims = jwt.validate(&pair.access_token).unwrap();
        assert_eq!(claims.user_id(), Some(1));
        assert_eq!(claims.role, UserRole::Manager);
        assert!(claims.is_access());
    }

    #[test]
    fn refresh_token_carries_refresh_type() {
        let jwt = test_jwt();
        let pair = jwt.issue_pair(7, UserRole::Director).unwrap();
        let claims = jwt.validate(&pair.refresh_token).unwrap();
        assert!(claims.is_refresh());
        assert_eq!(claims.user_id(), Some(7));
    }

    #[test]
    fn refresh_validation_rejects_access_tokens() {
        let jwt = test_jwt();
        let pair = jwt.issue_pair(1, UserRole::Manager).unwrap();
        assert!(jwt.validate_refresh(&pair.access_token).is_err());
        assert_eq!(jwt.validate_refresh(&pair.refresh_token).unwrap(), 1);
    }

    #[test]
    fn invalid_token_fails_validation() {
        let jwt = test_jwt();
        assert!(jwt.validate("not-a-valid-token").is_err());
    }

    #[test]
    fn wrong_secret_fails_validation() {
        let jwt1 = test_jwt();
        let jwt2 = JwtManager::new(b"different-secret", 3600, 86400);

        let pair = jwt1.issue_pair(1, UserRole::Manager).unwrap();
        assert!(jwt2.validate(&pair.access_token).is_err());
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let jwt = JwtManager::new(b"test-secret-key-for-testing", -120, 86400);
        let pair = jwt.issue_pair(1, UserRole::Manager).unwrap();
        let err = jwt.validate(&pair.access_token).unwrap_err();
        match err {
            AppError::Unauthorized(msg) => assert!(msg.contains("expired")),
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }
}
