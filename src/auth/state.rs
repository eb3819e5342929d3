//! Immutable key material shared by the authentication layers.

use crate::csrf::CsrfHasher;
use crate::jwt::TokenCodec;

/// Secrets for the three independent keys.
///
/// Built once at startup and shared read-only (behind an `Arc`) by every request.
#[derive(Clone)]
pub struct AuthKeys {
    access: TokenCodec,
    refresh: TokenCodec,
    csrf: CsrfHasher,
}

impl AuthKeys {
    pub fn new(access_secret: &[u8], refresh_secret: &[u8], csrf_secret: &[u8]) -> Self {
        Self {
            access: TokenCodec::new(access_secret),
            refresh: TokenCodec::new(refresh_secret),
            csrf: CsrfHasher::new(csrf_secret),
        }
    }

    /// Codec for access tokens (`JWT_ACCESS_TOKEN_SECRET`).
    pub fn access(&self) -> &TokenCodec {
        &self.access
    }

    /// Codec for refresh tokens (`JWT_REFRESH_TOKEN_SECRET`).
    pub fn refresh(&self) -> &TokenCodec {
        &self.refresh
    }

    /// CSRF token hasher (`CSRF_TOKEN_SECRET`).
    pub fn csrf(&self) -> &CsrfHasher {
        &self.csrf
    }
}
