//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Key-value storage (file on desktop, memory in tests)
//! - Clock/Ids (for testing)

mod error;
mod storage;
mod testing;

// =============================================================================
// Storage Port
// =============================================================================
pub use storage::StoragePort;

#[cfg(test)]
pub use storage::MockStoragePort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, IdPort};

#[cfg(test)]
pub use testing::{MockClockPort, MockIdPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::StorageError;
