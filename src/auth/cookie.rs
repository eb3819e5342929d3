//! Cookie parsing and `Set-Cookie` rendering for authentication.

use axum::http::header;

/// Cookie name for the access token.
pub const ACCESS_COOKIE_NAME: &str = "accessToken";

/// Cookie name for the refresh token.
pub const REFRESH_COOKIE_NAME: &str = "refreshToken";

/// Extract a cookie value from the Cookie header. An empty value counts as absent.
pub fn get_cookie<'a>(headers: &'a axum::http::HeaderMap, name: &str) -> Option<&'a str> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    for part in cookie_header.split(';') {
        let part = part.trim();
        if let Some((key, value)) = part.split_once('=') {
            if key.trim() == name {
                let value = value.trim();
                return (!value.is_empty()).then_some(value);
            }
        }
    }
    None
}

/// Render a `Set-Cookie` value for an auth cookie.
pub fn auth_cookie(name: &str, value: &str, max_age: u64, secure: bool) -> String {
    let secure = if secure { "; Secure" } else { "" };
    format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}{}",
        name, value, max_age, secure
    )
}

/// Render a `Set-Cookie` value that removes an auth cookie.
pub fn clear_cookie(name: &str, secure: bool) -> String {
    auth_cookie(name, "", 0, secure)
}
