//! Axum extractors for the identity attached by [`authenticate_token`].
//!
//! [`authenticate_token`]: super::authenticate_token

use axum::{extract::FromRequestParts, http::request::Parts};

use super::types::RequestIdentity;
use crate::api::ApiError;

/// Extractor for handlers mounted behind `authenticate_token`.
/// A missing identity means the route was wired without the middleware, so it
/// rejects with 500 rather than blaming the client.
pub struct Auth(pub RequestIdentity);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestIdentity>()
            .cloned()
            .map(Auth)
            .ok_or_else(|| {
                ApiError::internal(
                    "Authentication middleware not configured",
                    parts.uri.path(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};

    #[tokio::test]
    async fn test_missing_identity_is_server_error() {
        let (mut parts, _) = Request::get("/api/v1/auth/me").body(()).unwrap().into_parts();

        let err = match Auth::from_request_parts(&mut parts, &()).await {
            Ok(_) => panic!("Expected rejection without an attached identity"),
            Err(e) => e,
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
