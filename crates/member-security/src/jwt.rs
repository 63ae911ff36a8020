//! JWT token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use member_shared::constants::TOKEN_TYPE_ACCESS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
    #[error("Token carries no username claim")]
    MissingSubject,
    #[error("Unexpected token type: {0}")]
    WrongTokenType(String),
}

/// `sub` holds the username the token was issued for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub token_type: String,
}

impl Claims {
    /// Username of the caller, if the claims identify one.
    pub fn username(&self) -> Result<&str, JwtError> {
        if self.token_type != TOKEN_TYPE_ACCESS {
            return Err(JwtError::WrongTokenType(self.token_type.clone()));
        }
        let name = self.sub.trim();
        if name.is_empty() {
            return Err(JwtError::MissingSubject);
        }
        Ok(name)
    }
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry: access_expiry,
        }
    }

    pub fn generate_access_token(&self, username: &str) -> Result<String, JwtError> {
        self.generate_token(username, TOKEN_TYPE_ACCESS, self.access_token_expiry)
    }

    fn generate_token(&self, username: &str, token_type: &str, expiry: i64) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expiry)).timestamp(),
            token_type: token_type.to_string(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::CreationError(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::ValidationError(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "a sufficiently long test signing secret";

    #[test]
    fn test_issued_token_resolves_to_username() {
        let service = JwtService::new(SECRET, 3600);
        let token = service.generate_access_token("alice").unwrap();

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.username().unwrap(), "alice");
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = JwtService::new("another secret entirely", 3600);
        let token = issuer.generate_access_token("alice").unwrap();

        let service = JwtService::new(SECRET, 3600);
        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::ValidationError(_))
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // past the default 60s leeway
        let service = JwtService::new(SECRET, -600);
        let token = service.generate_access_token("alice").unwrap();

        assert_eq!(service.validate_token(&token).unwrap_err(), JwtError::TokenExpired);
    }

    #[test]
    fn test_blank_subject_has_no_username() {
        let claims = Claims {
            sub: " ".into(),
            iat: 0,
            exp: 0,
            token_type: TOKEN_TYPE_ACCESS.into(),
        };
        assert_eq!(claims.username().unwrap_err(), JwtError::MissingSubject);
    }

    #[test]
    fn test_refresh_token_type_has_no_username() {
        let claims = Claims {
            sub: "alice".into(),
            iat: 0,
            exp: 0,
            token_type: "refresh".into(),
        };
        assert!(matches!(claims.username(), Err(JwtError::WrongTokenType(_))));
    }
}
