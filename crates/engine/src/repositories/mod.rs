//! Repository modules - Data access wrappers around port traits.
//!
//! Each repository wraps a port trait and provides the interface
//! for use cases to access persisted aggregates.

pub mod character;

pub use character::{CharacterRepository, PersistOutcome, STORAGE_KEY, STORAGE_VERSION};
