//! CSRF token generation and HMAC verification.
//!
//! The browser receives a random CSRF token in a response body and echoes it back in
//! the `x-csrf-token` header. The access token carries `HMAC(csrf_secret, token)`, so
//! the server can check the echo without storing anything.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Number of random bytes in a CSRF token.
const CSRF_TOKEN_BYTES: usize = 32;

/// Keyed hasher for CSRF tokens.
#[derive(Clone)]
pub struct CsrfHasher {
    mac: HmacSha256,
}

impl CsrfHasher {
    pub fn new(secret: &[u8]) -> Self {
        // HMAC accepts keys of any length
        let mac = HmacSha256::new_from_slice(secret).expect("HMAC key of any size is valid");
        Self { mac }
    }

    /// Lowercase hex HMAC-SHA256 of a CSRF token.
    pub fn hash(&self, csrf_token: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(csrf_token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Check a CSRF token against a hex HMAC in constant time.
    pub fn verify(&self, csrf_token: &str, expected_hex: &str) -> bool {
        let Ok(expected) = hex::decode(expected_hex) else {
            return false;
        };
        let mut mac = self.mac.clone();
        mac.update(csrf_token.as_bytes());
        mac.verify_slice(&expected).is_ok()
    }
}

/// Generate a fresh random CSRF token (URL-safe base64).
pub fn generate_token() -> String {
    let mut bytes = [0u8; CSRF_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
