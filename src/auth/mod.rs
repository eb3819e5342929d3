//! JWT authentication with CSRF protection for cookie sessions.
//!
//! Dual-token system: short-lived access tokens and long-lived refresh tokens,
//! both stateless and signed with separate secrets. Browsers hold them as cookies
//! and must echo a CSRF token on mutating requests; API clients send the access
//! token as a Bearer header and are exempt from CSRF checks.

mod cookie;
mod errors;
mod extractors;
mod middleware;
mod session;
mod state;
mod types;

pub use cookie::{ACCESS_COOKIE_NAME, REFRESH_COOKIE_NAME, clear_cookie, get_cookie};
pub use errors::AuthError;
pub use extractors::Auth;
pub use middleware::{
    CSRF_HEADER_NAME, CsrfCheck, authenticate, authenticate_token, check_csrf, csrf_protection,
};
pub use session::{IssuedAccess, IssuedSession, TokenLifetimes, issue_access, issue_session};
pub use state::AuthKeys;
pub use types::{AuthMode, RequestIdentity, SessionUser};
