//! Minting of access/refresh token pairs with an embedded CSRF hash.

use super::cookie::{ACCESS_COOKIE_NAME, REFRESH_COOKIE_NAME, auth_cookie};
use super::state::AuthKeys;
use super::types::SessionUser;
use crate::csrf;
use crate::jwt::{
    ACCESS_TOKEN_DURATION_SECS, AccessClaims, JwtError, REFRESH_TOKEN_DURATION_SECS,
    RefreshClaims, now_secs,
};

/// Token lifetimes in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access_secs: u64,
    pub refresh_secs: u64,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access_secs: ACCESS_TOKEN_DURATION_SECS,
            refresh_secs: REFRESH_TOKEN_DURATION_SECS,
        }
    }
}

/// A freshly minted access token and the CSRF token it is bound to.
#[derive(Debug, Clone)]
pub struct IssuedAccess {
    pub token: String,
    /// Plain CSRF token for the client. Never put in a cookie.
    pub csrf_token: String,
    pub duration: u64,
}

impl IssuedAccess {
    pub fn cookie(&self, secure: bool) -> String {
        auth_cookie(ACCESS_COOKIE_NAME, &self.token, self.duration, secure)
    }
}

/// Access + refresh token pair.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub access: IssuedAccess,
    pub refresh_token: String,
    /// JWT ID of the refresh token
    pub refresh_jti: String,
    pub refresh_duration: u64,
}

impl IssuedSession {
    /// `Set-Cookie` values for both tokens.
    pub fn cookies(&self, secure: bool) -> [String; 2] {
        [
            self.access.cookie(secure),
            auth_cookie(
                REFRESH_COOKIE_NAME,
                &self.refresh_token,
                self.refresh_duration,
                secure,
            ),
        ]
    }
}

fn expiry(now: u64, lifetime: u64) -> Result<u64, JwtError> {
    now.checked_add(lifetime).ok_or(JwtError::ExpiryOverflow)
}

/// Mint a new access token, binding it to a freshly generated CSRF token.
pub fn issue_access(
    keys: &AuthKeys,
    user: &SessionUser,
    lifetimes: &TokenLifetimes,
) -> Result<IssuedAccess, JwtError> {
    let now = now_secs()?;
    let exp = expiry(now, lifetimes.access_secs)?;
    let csrf_token = csrf::generate_token();

    let claims = AccessClaims {
        sub: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        role_id: user.role_id,
        csrf_hmac: Some(keys.csrf().hash(&csrf_token)),
        iat: now,
        exp,
    };

    Ok(IssuedAccess {
        token: keys.access().sign(&claims)?,
        csrf_token,
        duration: lifetimes.access_secs,
    })
}

/// Mint a full session (access + refresh) for a user who just logged in.
pub fn issue_session(
    keys: &AuthKeys,
    user: &SessionUser,
    lifetimes: &TokenLifetimes,
) -> Result<IssuedSession, JwtError> {
    let access = issue_access(keys, user, lifetimes)?;

    let now = now_secs()?;
    let exp = expiry(now, lifetimes.refresh_secs)?;
    let jti = uuid::Uuid::new_v4().to_string();
    let claims = RefreshClaims {
        jti: jti.clone(),
        sub: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        role_id: user.role_id,
        iat: now,
        exp,
    };

    Ok(IssuedSession {
        access,
        refresh_token: keys.refresh().sign(&claims)?,
        refresh_jti: jti,
        refresh_duration: lifetimes.refresh_secs,
    })
}
