//! Key-value persistence port.

use super::StorageError;

/// String key-value storage.
///
/// Writes are applied in call order; a `load` after a `save` observes the
/// saved value.
#[cfg_attr(test, mockall::automock)]
pub trait StoragePort: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
