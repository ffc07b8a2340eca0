//! Identifier generation collaborator.

use uuid::Uuid;

/// Produces globally-unique ids for new todos. Deleted ids must never be
/// handed out again; collision-resistant random ids satisfy this.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> Uuid;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> Uuid {
        Uuid::new_v4()
    }
}
