//! JWT token generation and validation.
//!
//! Access and refresh tokens are signed with separate secrets, each held by its own
//! [`TokenCodec`]. A leaked refresh secret cannot be used to forge access tokens.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::{SystemTime, UNIX_EPOCH};

/// Default access token lifetime: 15 minutes
pub const ACCESS_TOKEN_DURATION_SECS: u64 = 15 * 60;

/// Default refresh token lifetime: 7 days
pub const REFRESH_TOKEN_DURATION_SECS: u64 = 7 * 24 * 60 * 60;

/// JWT claims for access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user id)
    pub sub: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Role id from the roles table
    pub role_id: i64,
    /// HMAC of the CSRF token issued alongside this access token (lowercase hex)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csrf_hmac: Option<String>,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// JWT claims for refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// JWT ID
    pub jti: String,
    /// Subject (user id)
    pub sub: String,
    pub name: String,
    pub email: String,
    pub role_id: i64,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Signs and verifies tokens with a single HS256 secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenCodec {
    /// Create a codec for the given secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Sign a claim set.
    pub fn sign<C: Serialize>(&self, claims: &C) -> Result<String, JwtError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(JwtError::Encoding)
    }

    /// Verify the signature and expiry of a token and decode its claims.
    pub fn verify<C: DeserializeOwned + Clone>(&self, token: &str) -> Result<C, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        jsonwebtoken::decode::<C>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(JwtError::from_decode)
    }
}

/// Current time as Unix seconds.
pub fn now_secs() -> Result<u64, JwtError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|_| JwtError::TimeError)
}

/// Errors that can occur during JWT operations.
#[derive(Debug)]
pub enum JwtError {
    /// Error encoding the token
    Encoding(jsonwebtoken::errors::Error),
    /// Signature does not match the secret
    InvalidSignature,
    /// Token `exp` is in the past
    Expired,
    /// Token could not be parsed or its claims are unusable
    Malformed(jsonwebtoken::errors::Error),
    /// System time error
    TimeError,
    /// `iat` plus the token lifetime does not fit in a timestamp
    ExpiryOverflow,
}

impl JwtError {
    fn from_decode(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidSignature => JwtError::InvalidSignature,
            ErrorKind::ExpiredSignature => JwtError::Expired,
            _ => JwtError::Malformed(e),
        }
    }
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::Encoding(e) => write!(f, "Failed to encode token: {}", e),
            JwtError::InvalidSignature => write!(f, "Invalid token signature"),
            JwtError::Expired => write!(f, "Token has expired"),
            JwtError::Malformed(e) => write!(f, "Malformed token: {}", e),
            JwtError::TimeError => write!(f, "System time error"),
            JwtError::ExpiryOverflow => write!(f, "Token lifetime overflows the expiry time"),
        }
    }
}

impl std::error::Error for JwtError {}
