//! Authentication and CSRF middlewares.
//!
//! `authenticate_token` accepts either an `Authorization: Bearer` access token or the
//! `accessToken` + `refreshToken` cookie pair and stores a [`RequestIdentity`] in the
//! request extensions.
//!
//! `csrf_protection` guards cookie sessions: the `x-csrf-token` header must hash to the
//! `csrf_hmac` claim of the access token cookie. Bearer clients are not browsers and
//! skip the check. It decodes the access cookie itself instead of reading the identity
//! left by `authenticate_token`.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use super::cookie::{ACCESS_COOKIE_NAME, REFRESH_COOKIE_NAME, get_cookie};
use super::errors::AuthError;
use super::state::AuthKeys;
use super::types::{AuthMode, RequestIdentity};
use crate::jwt::{AccessClaims, RefreshClaims};

/// Header carrying the echoed CSRF token.
pub const CSRF_HEADER_NAME: &str = "x-csrf-token";

const BEARER_PREFIX: &str = "Bearer ";

/// Outcome of a passed CSRF check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsrfCheck {
    /// Bearer request, not checked
    Exempt,
    /// Cookie request with a matching CSRF token
    Verified,
}

/// The Authorization header value, if it is a Bearer credential.
/// Returns `Some("")` for a bare `"Bearer "` prefix.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
}

/// Resolve the identity of a request from its headers.
pub fn authenticate(headers: &HeaderMap, keys: &AuthKeys) -> Result<RequestIdentity, AuthError> {
    if let Some(token) = bearer_token(headers) {
        if token.is_empty() {
            return Err(AuthError::InvalidAccessToken);
        }

        let user = keys.access().verify::<AccessClaims>(token).map_err(|e| {
            debug!(error = %e, "Bearer access token rejected");
            AuthError::InvalidAccessToken
        })?;

        return Ok(RequestIdentity {
            user,
            refresh: None,
            mode: AuthMode::Bearer,
        });
    }

    let (Some(access_token), Some(refresh_token)) = (
        get_cookie(headers, ACCESS_COOKIE_NAME),
        get_cookie(headers, REFRESH_COOKIE_NAME),
    ) else {
        return Err(AuthError::MissingTokens);
    };

    let user = keys
        .access()
        .verify::<AccessClaims>(access_token)
        .map_err(|e| {
            debug!(error = %e, "Access token cookie rejected");
            AuthError::InvalidAccessToken
        })?;

    let refresh = keys
        .refresh()
        .verify::<RefreshClaims>(refresh_token)
        .map_err(|e| {
            debug!(error = %e, user = %user.sub, "Refresh token cookie rejected");
            AuthError::InvalidRefreshToken
        })?;

    Ok(RequestIdentity {
        user,
        refresh: Some(refresh),
        mode: AuthMode::Cookie,
    })
}

/// Check the CSRF token of a request.
pub fn check_csrf(headers: &HeaderMap, keys: &AuthKeys) -> Result<CsrfCheck, AuthError> {
    if bearer_token(headers).is_some() {
        return Ok(CsrfCheck::Exempt);
    }

    let csrf_token = headers
        .get(CSRF_HEADER_NAME)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::InvalidCsrfToken)?;

    let access_token =
        get_cookie(headers, ACCESS_COOKIE_NAME).ok_or(AuthError::InvalidCsrfToken)?;

    let claims = keys
        .access()
        .verify::<AccessClaims>(access_token)
        .map_err(|e| {
            debug!(error = %e, "Access token rejected during CSRF check");
            AuthError::InvalidCsrfToken
        })?;

    let expected = claims
        .csrf_hmac
        .as_deref()
        .filter(|h| !h.is_empty())
        .ok_or(AuthError::InvalidCsrfToken)?;

    if !keys.csrf().verify(csrf_token, expected) {
        warn!(user = %claims.sub, "CSRF token mismatch");
        return Err(AuthError::CsrfMismatch);
    }

    Ok(CsrfCheck::Verified)
}

/// Middleware that authenticates the request and attaches its [`RequestIdentity`].
pub async fn authenticate_token(
    State(keys): State<Arc<AuthKeys>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let identity = authenticate(request.headers(), &keys)?;
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Middleware that rejects cookie-authenticated requests without a valid CSRF token.
pub async fn csrf_protection(
    State(keys): State<Arc<AuthKeys>>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    check_csrf(request.headers(), &keys)?;
    Ok(next.run(request).await)
}
