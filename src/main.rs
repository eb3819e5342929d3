use std::net::SocketAddr;

use clap::Parser;
use school_admin_auth::cli::{
    ACCESS_SECRET_ENV, Args, CSRF_SECRET_ENV, REFRESH_SECRET_ENV, build_config, init_logging,
    load_secret, secrets_are_distinct,
};
use school_admin_auth::{ServerConfig, create_app};
use tracing::{error, info};

// Secrets are read (and their env vars removed) before the runtime spawns any threads.
fn main() {
    let args = Args::parse();

    init_logging(&args.log_format);

    let Some(access_secret) =
        load_secret(ACCESS_SECRET_ENV, args.access_token_secret_file.as_deref())
    else {
        std::process::exit(1);
    };

    let Some(refresh_secret) =
        load_secret(REFRESH_SECRET_ENV, args.refresh_token_secret_file.as_deref())
    else {
        std::process::exit(1);
    };

    let Some(csrf_secret) = load_secret(CSRF_SECRET_ENV, args.csrf_token_secret_file.as_deref())
    else {
        std::process::exit(1);
    };

    if !secrets_are_distinct(&access_secret, &refresh_secret, &csrf_secret) {
        std::process::exit(1);
    }

    let config = build_config(&args, access_secret, refresh_secret, csrf_secret);
    serve(args.port, config);
}

#[tokio::main]
async fn serve(port: u16, config: ServerConfig) {
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            error!(address = %addr, error = %e, "Failed to bind");
            std::process::exit(1);
        });

    let local_addr = listener.local_addr().unwrap_or_else(|e| {
        error!(error = %e, "Failed to read local address");
        std::process::exit(1);
    });

    let app = create_app(&config);

    info!(
        address = %local_addr,
        secure_cookies = config.secure_cookies,
        access_ttl = config.lifetimes.access_secs,
        refresh_ttl = config.lifetimes.refresh_secs,
        "Listening"
    );

    let make_service = app.into_make_service_with_connect_info::<SocketAddr>();
    if let Err(e) = axum::serve(listener, make_service).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
