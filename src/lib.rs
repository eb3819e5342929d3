pub mod api;
pub mod auth;
pub mod cli;
pub mod csrf;
pub mod jwt;

use api::create_api_router;
use auth::{AuthKeys, TokenLifetimes};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Path under which the API is served.
pub const API_PATH: &str = "/api/v1";

pub struct ServerConfig {
    /// Secret for signing access tokens (`JWT_ACCESS_TOKEN_SECRET`)
    pub access_token_secret: Vec<u8>,
    /// Secret for signing refresh tokens (`JWT_REFRESH_TOKEN_SECRET`)
    pub refresh_token_secret: Vec<u8>,
    /// Secret for hashing CSRF tokens (`CSRF_TOKEN_SECRET`)
    pub csrf_token_secret: Vec<u8>,
    /// Token lifetimes used when minting tokens
    pub lifetimes: TokenLifetimes,
    /// Whether to set Secure flag on cookies (should be true in production with HTTPS)
    pub secure_cookies: bool,
}

/// Create the application router with the given configuration.
pub fn create_app(config: &ServerConfig) -> Router {
    let keys = Arc::new(AuthKeys::new(
        &config.access_token_secret,
        &config.refresh_token_secret,
        &config.csrf_token_secret,
    ));

    let api_router = create_api_router(keys, config.lifetimes, config.secure_cookies);

    Router::new().nest(API_PATH, api_router)
}

/// Run the server on the given listener. This function blocks until the server exits.
pub async fn run_server(config: ServerConfig, listener: TcpListener) -> Result<(), std::io::Error> {
    let app = create_app(&config);
    let make_service = app.into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, make_service).await
}

/// Start the server on the given port in a background task. Use port 0 to let the OS choose a random port.
/// Returns the actual address the server is listening on.
/// Note: For production use, prefer `run_server` directly in main.
pub async fn start_server(
    config: ServerConfig,
    port: u16,
) -> Result<(tokio::task::JoinHandle<()>, SocketAddr), std::io::Error> {
    let addr = format!("127.0.0.1:{}", port);
    let listener = TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = run_server(config, listener).await {
            tracing::error!(error = %e, "Server error");
        }
    });

    Ok((handle, local_addr))
}
