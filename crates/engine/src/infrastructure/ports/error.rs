//! Error types for port operations.

/// Storage operation errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O error in {operation}: {message}")]
    Io {
        operation: &'static str,
        message: String,
    },

    /// The stored data could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A lock guarding the cache was poisoned by a panicking writer.
    #[error("Storage lock poisoned")]
    LockPoisoned,
}

impl StorageError {
    pub fn io(operation: &'static str, err: impl ToString) -> Self {
        Self::Io {
            operation,
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
