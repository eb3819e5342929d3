//! CLI argument parsing, validation, and startup helpers.

use crate::ServerConfig;
use crate::auth::TokenLifetimes;
use crate::jwt::{ACCESS_TOKEN_DURATION_SECS, REFRESH_TOKEN_DURATION_SECS};
use clap::Parser;
use tracing::error;

const MIN_SECRET_LENGTH: usize = 32;

/// Upper bound for either token lifetime (one year).
pub const MAX_TOKEN_TTL_SECS: u64 = 365 * 24 * 60 * 60;

pub const ACCESS_SECRET_ENV: &str = "JWT_ACCESS_TOKEN_SECRET";
pub const REFRESH_SECRET_ENV: &str = "JWT_REFRESH_TOKEN_SECRET";
pub const CSRF_SECRET_ENV: &str = "CSRF_TOKEN_SECRET";

#[derive(clap::ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "school-admin-auth",
    about = "Authentication and CSRF gateway for the school administration API"
)]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5007")]
    pub port: u16,

    /// Path to file containing the access token secret. Prefer JWT_ACCESS_TOKEN_SECRET
    #[arg(long)]
    pub access_token_secret_file: Option<String>,

    /// Path to file containing the refresh token secret. Prefer JWT_REFRESH_TOKEN_SECRET
    #[arg(long)]
    pub refresh_token_secret_file: Option<String>,

    /// Path to file containing the CSRF token secret. Prefer CSRF_TOKEN_SECRET
    #[arg(long)]
    pub csrf_token_secret_file: Option<String>,

    /// Access token lifetime in seconds
    #[arg(long, default_value_t = ACCESS_TOKEN_DURATION_SECS, value_parser = clap::value_parser!(u64).range(1..=MAX_TOKEN_TTL_SECS))]
    pub access_token_ttl: u64,

    /// Refresh token lifetime in seconds
    #[arg(long, default_value_t = REFRESH_TOKEN_DURATION_SECS, value_parser = clap::value_parser!(u64).range(1..=MAX_TOKEN_TTL_SECS))]
    pub refresh_token_ttl: u64,

    /// Omit the Secure flag on auth cookies (plain HTTP development only)
    #[arg(long)]
    pub insecure_cookies: bool,

    /// Log output format
    #[arg(short, long, default_value = "pretty")]
    pub log_format: LogFormat,
}

/// Initialize logging based on the specified format.
pub fn init_logging(format: &LogFormat) {
    match format {
        LogFormat::Pretty => tracing_subscriber::fmt::init(),
        LogFormat::Json => tracing_subscriber::fmt().json().init(),
        LogFormat::Compact => tracing_subscriber::fmt().compact().init(),
    }
}

/// Load a secret from an environment variable or file.
/// Returns None and logs an error if the secret cannot be loaded.
///
/// Call this before starting the async runtime or any other thread: the
/// environment variable is removed after it is read.
pub fn load_secret(env_var: &str, secret_file: Option<&str>) -> Option<String> {
    let secret = if let Ok(secret) = std::env::var(env_var) {
        // Clear the environment variable to prevent leaking
        // SAFETY: main calls this before the tokio runtime exists, so no other
        // thread is reading or writing the environment.
        unsafe { std::env::remove_var(env_var) };
        secret
    } else if let Some(path) = secret_file {
        match std::fs::read_to_string(path) {
            Ok(content) => content.trim().to_string(),
            Err(e) => {
                error!(path = %path, error = %e, "Failed to read secret file");
                return None;
            }
        }
    } else {
        error!(
            variable = %env_var,
            "Secret is required. Set the environment variable (recommended) or pass a secret file"
        );
        return None;
    };

    validate_secret(env_var, &secret).then_some(secret)
}

fn validate_secret(name: &str, secret: &str) -> bool {
    if secret.len() < MIN_SECRET_LENGTH {
        error!(
            variable = %name,
            "Secret is shorter than {} characters. Use a longer secret",
            MIN_SECRET_LENGTH
        );
        return false;
    }
    true
}

/// Secrets must be pairwise distinct so that one leaked key cannot stand in for another.
pub fn secrets_are_distinct(access: &str, refresh: &str, csrf: &str) -> bool {
    if access == refresh || access == csrf || refresh == csrf {
        error!("Access, refresh and CSRF secrets must all be different");
        return false;
    }
    true
}

/// Build ServerConfig from validated arguments.
pub fn build_config(
    args: &Args,
    access_token_secret: String,
    refresh_token_secret: String,
    csrf_token_secret: String,
) -> ServerConfig {
    ServerConfig {
        access_token_secret: access_token_secret.into_bytes(),
        refresh_token_secret: refresh_token_secret.into_bytes(),
        csrf_token_secret: csrf_token_secret.into_bytes(),
        lifetimes: TokenLifetimes {
            access_secs: args.access_token_ttl,
            refresh_secs: args.refresh_token_ttl,
        },
        secure_cookies: !args.insecure_cookies,
    }
}
