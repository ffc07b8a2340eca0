//! Backing-store contract for the todo service.
//!
//! # Design
//! The store is plain keyed storage: it holds whatever record it is given
//! and hands back ordered slices for pagination. Validation, timestamps and
//! partial-update merging all live in the service layer. Methods take
//! `&mut self` for mutations — the service serializes access through its own
//! lock, so implementations need no interior mutability.

use thiserror::Error;
use uuid::Uuid;

use crate::types::Todo;

/// A storage failure. The in-memory store never raises one; durable
/// implementations map their transport errors here.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// One slice of an ordered enumeration. `next` is the position of the last
/// item in `items` when more items remain past it, `None` otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPage {
    pub items: Vec<Todo>,
    pub next: Option<u64>,
}

/// Durable keyed storage for todos with ordered enumeration.
///
/// Enumeration order must be stable and must place newly inserted records
/// after every position already handed out — pagination relies on it.
pub trait TodoStore: Send + Sync {
    /// Store a new record. The id is assumed fresh; the service never
    /// inserts an id twice.
    fn insert(&mut self, todo: Todo) -> Result<(), StoreError>;

    /// Fetch a record by id.
    fn get(&self, id: &Uuid) -> Result<Option<Todo>, StoreError>;

    /// Replace the record with `todo.id` in place, keeping its enumeration
    /// position. Returns `false` if no such record exists.
    fn update(&mut self, todo: Todo) -> Result<bool, StoreError>;

    /// Remove a record. Returns `false` if no such record exists.
    fn delete(&mut self, id: &Uuid) -> Result<bool, StoreError>;

    /// Enumerate up to `limit` records strictly after position `after`
    /// (from the beginning when `None`), in insertion order.
    fn scan(&self, after: Option<u64>, limit: usize) -> Result<ScanPage, StoreError>;
}
