//! Per-request credential and the claims the dashboard reads from it.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Deserialize;
use thiserror::Error;

const ADMIN_ROLE: &str = "ROLE_ADMIN";
const ADMIN_ONLY_PATHS: &[&str] = &["/User"];

/// Credential threaded explicitly through every API call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    token: Option<String>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        if token.trim().is_empty() {
            return Self::anonymous();
        }
        Self { token: Some(token) }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn claims(&self) -> Result<SessionClaims, ClaimsError> {
        let token = self.token().ok_or(ClaimsError::MissingToken)?;
        SessionClaims::from_token(token)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClaimsError {
    #[error("no token in context")]
    MissingToken,
    #[error("token is not a three-part JWT")]
    Malformed,
    #[error("token payload is not valid base64url")]
    Encoding,
    #[error("token payload is not valid claims json")]
    Payload,
}

#[derive(Debug, Deserialize)]
struct RawClaims {
    sub: String,
    #[serde(default)]
    roles: Vec<String>,
}

/// Identity carried inside the bearer token. Signature is not checked here;
/// the API does that on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub username: String,
    pub admin: bool,
}

impl SessionClaims {
    pub fn from_token(token: &str) -> Result<Self, ClaimsError> {
        let mut parts = token.split('.');
        let (Some(_header), Some(payload), Some(_signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(ClaimsError::Malformed);
        };

        let raw = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|_| ClaimsError::Encoding)?;
        let claims: RawClaims = serde_json::from_slice(&raw).map_err(|_| ClaimsError::Payload)?;

        Ok(Self {
            admin: claims.roles.first().is_some_and(|r| r == ADMIN_ROLE),
            username: claims.sub,
        })
    }

    pub fn can_access(&self, path: &str) -> bool {
        self.admin || !ADMIN_ONLY_PATHS.contains(&path)
    }
}

#[cfg(test)]
#[path = "tests/context_tests.rs"]
mod tests;
