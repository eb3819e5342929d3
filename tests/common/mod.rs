#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use school_admin_auth::auth::{AuthKeys, IssuedSession, SessionUser, TokenLifetimes, issue_session};
use school_admin_auth::{ServerConfig, create_app};
use tower::ServiceExt;

pub const ACCESS_SECRET: &[u8] = b"test-access-secret-at-least-32-bytes!";
pub const REFRESH_SECRET: &[u8] = b"test-refresh-secret-at-least-32-bytes";
pub const CSRF_SECRET: &[u8] = b"test-csrf-secret-at-least-32-bytes!!";

pub fn config() -> ServerConfig {
    ServerConfig {
        access_token_secret: ACCESS_SECRET.to_vec(),
        refresh_token_secret: REFRESH_SECRET.to_vec(),
        csrf_token_secret: CSRF_SECRET.to_vec(),
        lifetimes: TokenLifetimes::default(),
        secure_cookies: false,
    }
}

pub fn app() -> Router {
    create_app(&config())
}

/// Keys matching the secrets of [`app`].
pub fn keys() -> AuthKeys {
    AuthKeys::new(ACCESS_SECRET, REFRESH_SECRET, CSRF_SECRET)
}

pub fn admin() -> SessionUser {
    SessionUser {
        id: "1".to_string(),
        name: "School Admin".to_string(),
        email: "admin@school-admin.com".to_string(),
        role_id: 1,
    }
}

/// A valid session for the admin user, signed with the app's secrets.
pub fn session() -> IssuedSession {
    issue_session(&keys(), &admin(), &TokenLifetimes::default()).expect("Failed to issue session")
}

pub fn cookie_header(access: &str, refresh: &str) -> String {
    format!("accessToken={}; refreshToken={}", access, refresh)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

impl TestResponse {
    /// The `error` field of a JSON error body.
    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }

    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().expect("Invalid Set-Cookie").to_string())
            .collect()
    }
}

/// Request builder for the test app.
pub struct TestRequest {
    builder: axum::http::request::Builder,
}

impl TestRequest {
    pub fn get(path: &str) -> Self {
        Self::new("GET", path)
    }

    pub fn post(path: &str) -> Self {
        Self::new("POST", path)
    }

    fn new(method: &str, path: &str) -> Self {
        Self {
            builder: Request::builder().method(method).uri(path),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    pub fn bearer(self, token: &str) -> Self {
        self.header("authorization", &format!("Bearer {}", token))
    }

    pub fn cookies(self, access: &str, refresh: &str) -> Self {
        self.header("cookie", &cookie_header(access, refresh))
    }

    pub fn csrf(self, token: &str) -> Self {
        self.header("x-csrf-token", token)
    }

    pub async fn send(self, app: Router) -> TestResponse {
        let request = self
            .builder
            .body(Body::empty())
            .expect("Failed to build request");
        let response = app.oneshot(request).await.expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Body is not JSON")
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }
}
