//! Caller identity resolution
//!
//! Handlers only ever see a [`CurrentUser`]. How a username is read off a
//! request is up to the [`CallerIdentity`] implementation in the state.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use member_security::JwtService;
use tracing::debug;

use crate::error::ApiError;

/// Username of the authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub String);

impl CurrentUser {
    pub fn username(&self) -> &str {
        &self.0
    }
}

pub trait CallerIdentity: Send + Sync {
    /// Username carried by the request credentials.
    fn resolve(&self, headers: &HeaderMap) -> Result<String, ApiError>;
}

pub fn resolve_caller_identity(
    identity: &dyn CallerIdentity,
    headers: &HeaderMap,
) -> Result<CurrentUser, ApiError> {
    let username = identity.resolve(headers)?;
    debug!("Resolved caller: {}", username);
    Ok(CurrentUser(username))
}

/// `Authorization: Bearer <jwt>` whose `sub` claim is the username.
pub struct JwtBearerIdentity {
    jwt: JwtService,
}

impl JwtBearerIdentity {
    pub fn new(jwt: JwtService) -> Self {
        Self { jwt }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty()).then_some(token)
}

impl CallerIdentity for JwtBearerIdentity {
    fn resolve(&self, headers: &HeaderMap) -> Result<String, ApiError> {
        let token = bearer_token(headers)
            .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

        let claims = self
            .jwt
            .validate_token(token)
            .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

        claims
            .username()
            .map(str::to_string)
            .map_err(|e| ApiError::Unauthorized(e.to_string()))
    }
}
