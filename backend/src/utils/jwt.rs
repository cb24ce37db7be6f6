//! JWT token utilities for authentication and authorization.
//!
//! Tokens are HS256-signed with the server secret followed by the user's
//! current password hash. The hash never appears in the claims, but a token
//! stops validating as soon as the password changes.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::database::models::Role;
use crate::errors::ServiceError;

/// JWT Claims structure containing user identity and role
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// User role
    pub role: Role,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// JWT token utility for creating and validating tokens
#[derive(Clone)]
pub struct JwtUtils {
    secret: String,
    expires_in_seconds: u64,
    validation: Validation,
}

impl JwtUtils {
    /// Create a new JwtUtils instance from the loaded configuration
    pub fn new(config: &Config) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        JwtUtils {
            secret: config.jwt_secret.clone(),
            expires_in_seconds: config.jwt_expires_in_seconds,
            validation,
        }
    }

    /// Token lifetime in seconds.
    pub fn expires_in_seconds(&self) -> u64 {
        self.expires_in_seconds
    }

    fn signing_key(&self, password_hash: &str) -> Vec<u8> {
        let mut key = Vec::with_capacity(self.secret.len() + password_hash.len());
        key.extend_from_slice(self.secret.as_bytes());
        key.extend_from_slice(password_hash.as_bytes());
        key
    }

    /// Generate a new JWT token bound to the user's id, password hash and role
    pub fn generate_token(
        &self,
        user_id: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<String, ServiceError> {
        let now = Utc::now();
        let exp = i64::try_from(self.expires_in_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| ServiceError::internal("Token lifetime out of range"))?;

        let claims = Claims {
            sub: user_id.to_string(),
            role,
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let key = EncodingKey::from_secret(&self.signing_key(password_hash));
        encode(&Header::default(), &claims, &key)
            .map_err(|e| ServiceError::internal(format!("Token generation failed: {}", e)))
    }

    /// Reads the subject of a token without checking its signature.
    ///
    /// Only used to find which password hash the token must be verified with.
    pub fn peek_subject(&self, token: &str) -> Result<String, ServiceError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;

        decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
            .map(|token_data| token_data.claims.sub)
            .map_err(|e| ServiceError::unauthorized(format!("Malformed token: {}", e)))
    }

    /// Validate and decode a JWT token against the user's current password hash
    pub fn validate_token(&self, token: &str, password_hash: &str) -> Result<Claims, ServiceError> {
        let key = DecodingKey::from_secret(&self.signing_key(password_hash));
        decode::<Claims>(token, &key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| ServiceError::unauthorized(format!("Token validation failed: {}", e)))
    }
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }

    /// Check if user is admin
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn jwt_utils(expires_in_seconds: u64) -> JwtUtils {
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 3,
            jwt_secret: "test-secret".to_string(),
            jwt_expires_in_seconds: expires_in_seconds,
            bcrypt_cost: 4,
            server_port: 0,
            cors_allowed_origin: HeaderValue::from_static("http://localhost:5173"),
            admin_emails: Vec::new(),
        };
        JwtUtils::new(&config)
    }

    #[test]
    fn test_generate_and_validate_token() {
        let jwt = jwt_utils(3600);
        let token = jwt.generate_token("user-1", "$2b$04$hash", Role::User).unwrap();

        let claims = jwt.validate_token(&token, "$2b$04$hash").unwrap();
        assert_eq!(claims.user_id(), "user-1");
        assert_eq!(claims.role, Role::User);
        assert!(!claims.is_admin());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_token_does_not_contain_password_hash() {
        let jwt = jwt_utils(3600);
        let token = jwt.generate_token("user-1", "secret-hash", Role::Admin).unwrap();

        let payload = token.split('.').nth(1).unwrap();
        assert!(!payload.contains("secret-hash"));
        assert!(!token.contains("secret-hash"));
    }

    #[test]
    fn test_token_rejected_after_password_change() {
        let jwt = jwt_utils(3600);
        let token = jwt.generate_token("user-1", "old-hash", Role::User).unwrap();

        let err = jwt.validate_token(&token, "new-hash").unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized { .. }));
    }

    #[test]
    fn test_token_rejected_with_other_secret() {
        let token = jwt_utils(3600)
            .generate_token("user-1", "hash", Role::User)
            .unwrap();

        let mut other = jwt_utils(3600);
        other.secret = "another-secret".to_string();
        assert!(other.validate_token(&token, "hash").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let jwt = jwt_utils(0);
        let now = Utc::now();
        let claims = Claims {
            sub: "user-1".to_string(),
            role: Role::User,
            exp: (now - Duration::seconds(60)).timestamp() as usize,
            iat: (now - Duration::seconds(120)).timestamp() as usize,
        };
        let key = EncodingKey::from_secret(&jwt.signing_key("hash"));
        let token = encode(&Header::default(), &claims, &key).unwrap();

        assert!(jwt.validate_token(&token, "hash").is_err());
        assert_eq!(jwt.peek_subject(&token).unwrap(), "user-1");
    }

    #[test]
    fn test_oversized_lifetime_is_an_error_not_a_panic() {
        let jwt = jwt_utils(u64::MAX);
        let err = jwt.generate_token("user-1", "hash", Role::User).unwrap_err();
        assert!(matches!(err, ServiceError::Internal { .. }));
    }

    #[test]
    fn test_peek_subject_rejects_garbage() {
        let jwt = jwt_utils(3600);
        assert!(jwt.peek_subject("not-a-token").is_err());
    }
}
