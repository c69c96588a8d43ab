//! Access token generation and hashing.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Prefix on every issued token, so leaked tokens are recognizable in
/// logs and secret scanners.
pub const TOKEN_PREFIX: &str = "thunai_";

/// Generate a fresh plaintext access token.
pub fn generate_token() -> String {
    format!("{}{}", TOKEN_PREFIX, Uuid::new_v4().simple())
}

/// SHA-256 hash of a token, hex-encoded. This is the only form that is
/// ever persisted or compared.
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
