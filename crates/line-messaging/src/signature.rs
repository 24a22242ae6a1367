//! Webhook signature verification.
//!
//! LINE signs each delivery with HMAC-SHA256 over the raw request body,
//! keyed by the channel secret, and sends the base64 digest in the
//! `X-Line-Signature` header.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

use crate::error::LineError;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the signature.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Compute the base64 signature for `body`.
pub fn sign(channel_secret: &str, body: &[u8]) -> Result<String, LineError> {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes())
        .map_err(|e| LineError::Config(format!("invalid channel secret: {}", e)))?;
    mac.update(body);
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Verify `signature` against `body`.
///
/// The comparison runs in constant time.
pub fn verify_signature(channel_secret: &str, body: &[u8], signature: &str) -> Result<(), LineError> {
    let Ok(expected) = STANDARD.decode(signature.trim()) else {
        warn!("signature header is not valid base64");
        return Err(LineError::InvalidSignature);
    };

    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes())
        .map_err(|e| LineError::Config(format!("invalid channel secret: {}", e)))?;
    mac.update(body);
    mac.verify_slice(&expected)
        .map_err(|_| LineError::InvalidSignature)
}
