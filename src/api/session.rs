//! Session API endpoints.
//!
//! - GET `/me` - Identity of the authenticated caller
//! - POST `/refresh` - Exchange the refresh token cookie for a new access token
//! - POST `/logout` - Clear both auth cookies (CSRF protected)

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    middleware,
    response::{AppendHeaders, IntoResponse},
    routing::{get, post},
};
use serde::Serialize;
use tower::ServiceBuilder;
use tracing::{debug, info};

use super::error::ApiError;
use crate::auth::{
    ACCESS_COOKIE_NAME, Auth, AuthError, AuthKeys, AuthMode, REFRESH_COOKIE_NAME,
    SessionUser, TokenLifetimes, authenticate_token, clear_cookie, csrf_protection, get_cookie,
    issue_access,
};
use crate::jwt::RefreshClaims;

#[derive(Clone)]
pub struct SessionState {
    pub keys: Arc<AuthKeys>,
    pub lifetimes: TokenLifetimes,
    pub secure_cookies: bool,
}

pub fn router(state: SessionState) -> Router {
    let keys = state.keys.clone();

    // Authentication runs first, then CSRF
    let mutating = Router::new().route("/logout", post(logout)).route_layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn_with_state(keys.clone(), authenticate_token))
            .layer(middleware::from_fn_with_state(keys.clone(), csrf_protection)),
    );

    let read_only = Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(keys, authenticate_token));

    Router::new()
        .route("/refresh", post(refresh))
        .merge(read_only)
        .merge(mutating)
        .with_state(state)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserInfo {
    id: String,
    name: String,
    email: String,
    role_id: i64,
}

#[derive(Serialize)]
struct MeResponse {
    user: UserInfo,
    mode: AuthMode,
}

/// Return the identity decoded from the caller's access token.
async fn me(Auth(identity): Auth) -> impl IntoResponse {
    let user = identity.user;
    Json(MeResponse {
        user: UserInfo {
            id: user.sub,
            name: user.name,
            email: user.email,
            role_id: user.role_id,
        },
        mode: identity.mode,
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    csrf_token: String,
}

/// Mint a new access token (and CSRF token) from a valid refresh token cookie.
/// The refresh token itself is not rotated.
async fn refresh(
    State(state): State<SessionState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let refresh_token =
        get_cookie(&headers, REFRESH_COOKIE_NAME).ok_or(AuthError::InvalidRefreshToken)?;

    let claims = state
        .keys
        .refresh()
        .verify::<RefreshClaims>(refresh_token)
        .map_err(|e| {
            debug!(error = %e, "Refresh rejected");
            AuthError::InvalidRefreshToken
        })?;

    let issued = issue_access(&state.keys, &SessionUser::from(&claims), &state.lifetimes)
        .map_err(|e| ApiError::internal("Failed to generate token", e))?;

    info!(user = %claims.sub, jti = %claims.jti, "Access token refreshed");

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, issued.cookie(state.secure_cookies))],
        Json(RefreshResponse {
            csrf_token: issued.csrf_token,
        }),
    ))
}

/// Clear both auth cookies. Tokens are stateless, so nothing is revoked server-side.
async fn logout(State(state): State<SessionState>, Auth(identity): Auth) -> impl IntoResponse {
    info!(user = %identity.user.sub, "Logged out");

    let clear_access = clear_cookie(ACCESS_COOKIE_NAME, state.secure_cookies);
    let clear_refresh = clear_cookie(REFRESH_COOKIE_NAME, state.secure_cookies);

    (
        StatusCode::OK,
        AppendHeaders([(SET_COOKIE, clear_access), (SET_COOKIE, clear_refresh)]),
        Json(serde_json::json!({ "message": "Logged out successfully" })),
    )
}
