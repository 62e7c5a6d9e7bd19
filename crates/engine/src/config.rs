//! Environment configuration.

use std::path::PathBuf;

use directories::ProjectDirs;

pub const STORAGE_PATH_VAR: &str = "HEROSMITH_STORAGE_PATH";
pub const CATALOG_PATH_VAR: &str = "HEROSMITH_CATALOG_PATH";

/// Used when the platform has no config directory.
const FALLBACK_STORAGE_FILE: &str = "herosmith_storage.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Storage file for the roster.
    pub storage_path: PathBuf,
    /// JSON catalog to load instead of the built-in one.
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            storage_path: var(STORAGE_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(default_storage_path),
            catalog_path: var(CATALOG_PATH_VAR).map(PathBuf::from),
        }
    }
}

/// Platform config directory, e.g. `~/.config/herosmith/storage.json` on Linux.
pub fn default_storage_path() -> PathBuf {
    match ProjectDirs::from("io", "herosmith", "herosmith") {
        Some(dirs) => dirs.config_dir().join("storage.json"),
        None => PathBuf::from(FALLBACK_STORAGE_FILE),
    }
}
