//! Tests for CSRF protection on mutating routes.

mod common;

use axum::http::StatusCode;
use common::{TestRequest, app, keys, session};
use school_admin_auth::auth::{SessionUser, TokenLifetimes, issue_session};
use school_admin_auth::jwt::{AccessClaims, now_secs};

const LOGOUT: &str = "/api/v1/auth/logout";

#[tokio::test]
async fn test_bearer_request_skips_csrf() {
    let session = session();

    let res = TestRequest::post(LOGOUT)
        .bearer(&session.access.token)
        .send(app())
        .await;

    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn test_matching_csrf_token_passes() {
    let session = session();

    let res = TestRequest::post(LOGOUT)
        .cookies(&session.access.token, &session.refresh_token)
        .csrf(&session.access.csrf_token)
        .send(app())
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Logged out successfully");
}

#[tokio::test]
async fn test_embedded_hash_of_known_token_passes() {
    let session = session();
    let now = now_secs().unwrap();
    let access = keys()
        .access()
        .sign(&AccessClaims {
            sub: "1".to_string(),
            name: "School Admin".to_string(),
            email: "admin@school-admin.com".to_string(),
            role_id: 1,
            csrf_hmac: Some(keys().csrf().hash("tok1")),
            iat: now,
            exp: now + 60,
        })
        .unwrap();

    let res = TestRequest::post(LOGOUT)
        .cookies(&access, &session.refresh_token)
        .csrf("tok1")
        .send(app())
        .await;

    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn test_missing_csrf_header_rejected() {
    let session = session();

    let res = TestRequest::post(LOGOUT)
        .cookies(&session.access.token, &session.refresh_token)
        .send(app())
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), "Invalid csrf token");
}

#[tokio::test]
async fn test_empty_csrf_header_rejected() {
    let session = session();

    let res = TestRequest::post(LOGOUT)
        .cookies(&session.access.token, &session.refresh_token)
        .csrf("")
        .send(app())
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), "Invalid csrf token");
}

#[tokio::test]
async fn test_mismatched_csrf_token_forbidden() {
    let session = session();

    let res = TestRequest::post(LOGOUT)
        .cookies(&session.access.token, &session.refresh_token)
        .csrf("not-the-issued-token")
        .send(app())
        .await;

    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.error(), "Forbidden. CSRF token mismatch");
}

#[tokio::test]
async fn test_csrf_token_of_another_session_forbidden() {
    let mine = session();
    let other_user = SessionUser {
        id: "2".to_string(),
        name: "Other".to_string(),
        email: "other@school-admin.com".to_string(),
        role_id: 3,
    };
    let theirs = issue_session(&keys(), &other_user, &TokenLifetimes::default()).unwrap();

    let res = TestRequest::post(LOGOUT)
        .cookies(&mine.access.token, &mine.refresh_token)
        .csrf(&theirs.access.csrf_token)
        .send(app())
        .await;

    assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_access_token_without_csrf_claim_rejected() {
    let session = session();
    let now = now_secs().unwrap();
    let access = keys()
        .access()
        .sign(&AccessClaims {
            sub: "1".to_string(),
            name: "School Admin".to_string(),
            email: "admin@school-admin.com".to_string(),
            role_id: 1,
            csrf_hmac: None,
            iat: now,
            exp: now + 60,
        })
        .unwrap();

    let res = TestRequest::post(LOGOUT)
        .cookies(&access, &session.refresh_token)
        .csrf("tok1")
        .send(app())
        .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error(), "Invalid csrf token");
}

#[tokio::test]
async fn test_authentication_runs_before_csrf() {
    // No credentials at all: authentication rejects before the CSRF check
    let res = TestRequest::post(LOGOUT).csrf("tok1").send(app()).await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_read_only_route_needs_no_csrf() {
    let session = session();

    let res = TestRequest::get("/api/v1/auth/me")
        .cookies(&session.access.token, &session.refresh_token)
        .send(app())
        .await;

    assert_eq!(res.status, StatusCode::OK);
}
