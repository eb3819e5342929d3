mod error;
mod session;

use axum::Router;
use std::sync::Arc;

use crate::auth::{AuthKeys, TokenLifetimes};

pub use error::ApiError;
pub use session::SessionState;

/// Create the API router.
///
/// Resource modules are nested here behind `authenticate_token` and, for mutating
/// routes, `csrf_protection`.
pub fn create_api_router(
    keys: Arc<AuthKeys>,
    lifetimes: TokenLifetimes,
    secure_cookies: bool,
) -> Router {
    let session_state = SessionState {
        keys,
        lifetimes,
        secure_cookies,
    };

    Router::new().nest("/auth", session::router(session_state))
}
