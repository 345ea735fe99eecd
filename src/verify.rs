//! Request signature verification.
//!
//! The platform signs every callback with the application's Ed25519 key
//! over `timestamp || body`; anything that does not verify must be
//! rejected with a 401 before the body is even parsed.

use crate::errors::{Error, Result};
use ed25519_dalek::{Signature, VerifyingKey};

/// Parses the hex-encoded application public key.
pub fn parse_public_key(hex_key: &str) -> Result<VerifyingKey> {
    let bytes: [u8; 32] = hex::decode(hex_key)
        .map_err(|_| Error::Config {
            message: "public key is not valid hex".to_string(),
        })?
        .try_into()
        .map_err(|_| Error::Config {
            message: "public key must be 32 bytes".to_string(),
        })?;

    VerifyingKey::from_bytes(&bytes).map_err(|_| Error::Config {
        message: "public key is not a valid Ed25519 point".to_string(),
    })
}

/// Checks a request signature. Malformed headers simply fail verification.
#[must_use]
pub fn verify(key: &VerifyingKey, signature_hex: &str, timestamp: &str, body: &[u8]) -> bool {
    let Ok(bytes) = hex::decode(signature_hex) else {
        return false;
    };
    let Ok(bytes) = <[u8; 64]>::try_from(bytes) else {
        return false;
    };
    let signature = Signature::from_bytes(&bytes);

    let mut message = Vec::with_capacity(timestamp.len() + body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(body);

    key.verify_strict(&message, &signature).is_ok()
}
