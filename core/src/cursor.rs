//! Opaque page tokens.
//!
//! A token encodes the store position of the last item already returned, so
//! the next page resumes strictly after it. Tokens are URL-safe base64 over
//! a versioned payload; clients must treat them as opaque strings.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use thiserror::Error;

const VERSION_PREFIX: &str = "v1:";

/// A page token that could not be decoded.
#[derive(Debug, Error)]
#[error("malformed page token")]
pub struct CursorError;

/// Encode the position of the last returned item into a page token.
pub fn encode(after: u64) -> String {
    URL_SAFE_NO_PAD.encode(format!("{VERSION_PREFIX}{after}"))
}

/// Decode a page token back into a store position.
pub fn decode(token: &str) -> Result<u64, CursorError> {
    let bytes = URL_SAFE_NO_PAD.decode(token).map_err(|_| CursorError)?;
    let text = std::str::from_utf8(&bytes).map_err(|_| CursorError)?;
    let position = text.strip_prefix(VERSION_PREFIX).ok_or(CursorError)?;
    position.parse().map_err(|_| CursorError)
}
