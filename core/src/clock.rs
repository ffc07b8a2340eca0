//! Clock collaborator for `createdAt`/`updatedAt` stamping.

use chrono::{DateTime, Utc};

/// Source of timestamps. Implementations must be monotonically
/// non-decreasing; the service handles the strictly-increasing requirement
/// for `updatedAt` itself.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
