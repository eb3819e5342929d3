//! Authentication and CSRF error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::ApiError;

/// Failure reasons of the authentication and CSRF middlewares.
///
/// Every variant is terminal for the request. Malformed and expired tokens are not
/// told apart in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Bearer header without a usable access token
    InvalidAccessToken,
    /// Cookie mode with the access or refresh cookie missing
    MissingTokens,
    /// Refresh token failed verification
    InvalidRefreshToken,
    /// CSRF header missing, or the access token has no usable `csrf_hmac`
    InvalidCsrfToken,
    /// CSRF header does not match the hash embedded in the access token
    CsrfMismatch,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidAccessToken
            | AuthError::MissingTokens
            | AuthError::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
            AuthError::InvalidCsrfToken => StatusCode::BAD_REQUEST,
            AuthError::CsrfMismatch => StatusCode::FORBIDDEN,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AuthError::InvalidAccessToken => "Unauthorized. Please provide valid access token.",
            AuthError::MissingTokens => "Unauthorized. Please provide valid tokens.",
            AuthError::InvalidRefreshToken => "Unauthorized. Please provide valid refresh token.",
            AuthError::InvalidCsrfToken => "Invalid csrf token",
            AuthError::CsrfMismatch => "Forbidden. CSRF token mismatch",
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for AuthError {}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e.status_code() {
            StatusCode::BAD_REQUEST => ApiError::bad_request(e.message()),
            StatusCode::FORBIDDEN => ApiError::forbidden(e.message()),
            _ => ApiError::unauthorized(e.message()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
