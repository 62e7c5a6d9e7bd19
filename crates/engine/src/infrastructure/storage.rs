//! Key-value storage adapters
//!
//! [`FileStorage`] keeps every key in one JSON object on disk and mirrors it in
//! an in-memory cache, so reads never touch the file. [`MemoryStorage`] is the
//! same contract with no file behind it.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::infrastructure::ports::{StorageError, StoragePort};

/// File-backed storage.
///
/// The whole map is rewritten on every `save`/`remove`.
#[derive(Clone)]
pub struct FileStorage {
    /// Path to the storage file
    storage_path: PathBuf,
    /// In-memory cache of stored values
    cache: Arc<RwLock<HashMap<String, String>>>,
}

impl FileStorage {
    /// Open the storage file at `path`.
    ///
    /// A missing file starts empty. An unreadable or unparsable file also
    /// starts empty, with a warning; it is overwritten on the next save.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let storage_path = path.into();

        let cache = if storage_path.exists() {
            match fs::read_to_string(&storage_path) {
                Ok(data) => match serde_json::from_str::<HashMap<String, String>>(&data) {
                    Ok(map) => map,
                    Err(e) => {
                        tracing::warn!(path = %storage_path.display(), error = %e, "Failed to parse storage file");
                        HashMap::new()
                    }
                },
                Err(e) => {
                    tracing::warn!(path = %storage_path.display(), error = %e, "Failed to read storage file");
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        tracing::debug!(path = %storage_path.display(), keys = cache.len(), "File storage initialized");

        Self {
            storage_path,
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    /// Write the cache to disk.
    fn persist(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.storage_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StorageError::io("create_dir", e))?;
            }
        }

        let data = {
            let cache = self.cache.read().map_err(|_| StorageError::LockPoisoned)?;
            serde_json::to_string_pretty(&*cache)?
        };

        fs::write(&self.storage_path, data).map_err(|e| StorageError::io("write", e))
    }
}

impl StoragePort for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self.cache.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(guard.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self.cache.write().map_err(|_| StorageError::LockPoisoned)?;
        guard.insert(key.to_string(), value.to_string());
        drop(guard); // Release lock before I/O
        self.persist()
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self.cache.write().map_err(|_| StorageError::LockPoisoned)?;
        if guard.remove(key).is_none() {
            return Ok(());
        }
        drop(guard);
        self.persist()
    }
}

/// In-memory storage. Contents vanish with the value.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    cache: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoragePort for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self.cache.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(guard.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self.cache.write().map_err(|_| StorageError::LockPoisoned)?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self.cache.write().map_err(|_| StorageError::LockPoisoned)?;
        guard.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_round_trips_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = FileStorage::open(&path);
        storage.save("herosmith:characters", "{\"version\":1}").unwrap();
        assert_eq!(
            storage.load("herosmith:characters").unwrap().as_deref(),
            Some("{\"version\":1}")
        );

        let reopened = FileStorage::open(&path);
        assert_eq!(
            reopened.load("herosmith:characters").unwrap().as_deref(),
            Some("{\"version\":1}")
        );
    }

    #[test]
    fn last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("storage.json"));
        storage.save("k", "first").unwrap();
        storage.save("k", "second").unwrap();
        assert_eq!(storage.load("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let storage = FileStorage::open(&path);
        storage.save("k", "v").unwrap();
        storage.remove("k").unwrap();

        assert_eq!(FileStorage::open(&path).load("k").unwrap(), None);
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let storage = FileStorage::open(&path);
        assert_eq!(storage.load("anything").unwrap(), None);
        storage.save("k", "v").unwrap();
        assert_eq!(FileStorage::open(&path).load("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn write_failure_is_reported_but_cache_keeps_value() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the write fail.
        let path = dir.path().join("blocked");
        fs::create_dir(&path).unwrap();

        let storage = FileStorage::open(&path);
        assert!(matches!(storage.save("k", "v"), Err(StorageError::Io { .. })));
        assert_eq!(storage.load("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn memory_storage_contract() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.load("k").unwrap(), None);
        storage.save("k", "v").unwrap();
        assert_eq!(storage.load("k").unwrap().as_deref(), Some("v"));
        storage.remove("k").unwrap();
        assert_eq!(storage.load("k").unwrap(), None);
    }
}
