//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` and `InvalidArgument` get dedicated variants because callers
//! branch on them — a cleanup routine treats `NotFound` on its post-delete
//! verification as success, and a form surfaces `InvalidArgument` messages
//! to the user. All other non-2xx responses land in `Http` with the raw
//! status code and body for debugging.

use thiserror::Error;

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404 — the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned 400 — a validation failure or a malformed page
    /// token, with the server's message.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The server returned a non-2xx status other than 400 or 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}
