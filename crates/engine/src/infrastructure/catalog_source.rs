//! Loading the reference catalog.

use std::fs;
use std::path::Path;

use herosmith_domain::{Catalog, CatalogError};

#[derive(Debug, thiserror::Error)]
pub enum CatalogSourceError {
    #[error("Failed to read catalog file {path}: {message}")]
    Io { path: String, message: String },
    #[error("Failed to parse catalog file {path}: {message}")]
    Json { path: String, message: String },
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// The built-in catalog, or the JSON catalog at `path` when one is given.
///
/// Lint warnings are logged, not returned; a catalog with warnings still loads.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, CatalogSourceError> {
    let catalog = match path {
        Some(path) => {
            let catalog = from_file(path)?;
            tracing::info!(
                path = %path.display(),
                kin = catalog.kin_list().len(),
                classes = catalog.classes().len(),
                "Loaded catalog file"
            );
            catalog
        }
        None => Catalog::core(),
    };

    for warning in catalog.lint() {
        tracing::warn!(%warning, "Catalog lint");
    }
    Ok(catalog)
}

/// Parse a catalog file. Construction checks run during deserialization.
pub fn from_file(path: &Path) -> Result<Catalog, CatalogSourceError> {
    let data = fs::read_to_string(path).map_err(|e| CatalogSourceError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    from_json(&data).map_err(|e| match e {
        CatalogSourceError::Json { message, .. } => CatalogSourceError::Json {
            path: path.display().to_string(),
            message,
        },
        other => other,
    })
}

pub fn from_json(data: &str) -> Result<Catalog, CatalogSourceError> {
    serde_json::from_str(data).map_err(|e| CatalogSourceError::Json {
        path: "<inline>".to_string(),
        message: e.to_string(),
    })
}
