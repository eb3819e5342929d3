//! Authentication identity types.

use serde::Serialize;

use crate::jwt::{AccessClaims, RefreshClaims};

/// How the request presented its credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// `Authorization: Bearer` header. Exempt from CSRF checks.
    Bearer,
    /// `accessToken` + `refreshToken` cookies.
    Cookie,
}

/// Identity attached to a request by the authentication middleware.
/// Lives in request extensions for one request and is never persisted.
#[derive(Debug, Clone)]
pub struct RequestIdentity {
    /// Claims from the access token
    pub user: AccessClaims,
    /// Claims from the refresh token (cookie mode only)
    pub refresh: Option<RefreshClaims>,
    pub mode: AuthMode,
}

/// User details needed to mint a new session.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role_id: i64,
}

impl From<&RefreshClaims> for SessionUser {
    fn from(claims: &RefreshClaims) -> Self {
        Self {
            id: claims.sub.clone(),
            name: claims.name.clone(),
            email: claims.email.clone(),
            role_id: claims.role_id,
        }
    }
}
