//! Error taxonomy for the todo service.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from other failures — a cleanup routine that
//! deletes and then verifies treats `NotFound` on the verification step as
//! success. Storage failures are never swallowed; they propagate as
//! `Storage`.

use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

/// Errors returned by [`crate::TodoService`] operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A required field was missing or empty, or a page token was
    /// unparseable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The referenced id does not correspond to a live todo — it never
    /// existed or was deleted.
    #[error("todo not found: {0}")]
    NotFound(Uuid),

    /// The backing store failed; propagated to the caller unchanged.
    #[error(transparent)]
    Storage(#[from] StoreError),
}
