//! Testability ports for injecting time and identity.

use chrono::{DateTime, Utc};
use uuid::Uuid;

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of fresh character ids.
#[cfg_attr(test, mockall::automock)]
pub trait IdPort: Send + Sync {
    fn next_id(&self) -> Uuid;
}
