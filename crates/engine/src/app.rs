//! Application state and composition.

use std::sync::Arc;

use herosmith_domain::Catalog;

use crate::config::Config;
use crate::infrastructure::{
    catalog_source::{self, CatalogSourceError},
    clock::{SystemClock, UuidIdGenerator},
    ports::{ClockPort, IdPort, StoragePort},
    storage::FileStorage,
};
use crate::repositories::CharacterRepository;
use crate::use_cases::{RosterUseCase, WizardSession};

/// Main application state.
///
/// Holds the catalog, the roster and the ports the use cases are built from.
pub struct App {
    pub catalog: Arc<Catalog>,
    pub roster: CharacterRepository,
    pub use_cases: UseCases,
    clock: Arc<dyn ClockPort>,
    ids: Arc<dyn IdPort>,
}

/// Container for stateless use cases.
pub struct UseCases {
    pub roster: RosterUseCase,
}

impl App {
    /// Wire up production adapters from configuration.
    pub fn new(config: &Config) -> Result<Self, CatalogSourceError> {
        let catalog = catalog_source::load_catalog(config.catalog_path.as_deref())?;
        let storage: Arc<dyn StoragePort> = Arc::new(FileStorage::open(&config.storage_path));
        tracing::info!(path = %config.storage_path.display(), "Using storage file");

        Ok(Self::with_ports(
            Arc::new(catalog),
            storage,
            Arc::new(SystemClock::new()),
            Arc::new(UuidIdGenerator::new()),
        ))
    }

    /// Wire up with explicit ports.
    pub fn with_ports(
        catalog: Arc<Catalog>,
        storage: Arc<dyn StoragePort>,
        clock: Arc<dyn ClockPort>,
        ids: Arc<dyn IdPort>,
    ) -> Self {
        let roster = CharacterRepository::load(storage, clock.clone());
        let use_cases = UseCases {
            roster: RosterUseCase::new(catalog.clone()),
        };
        Self {
            catalog,
            roster,
            use_cases,
            clock,
            ids,
        }
    }

    /// A fresh wizard session over this app's catalog and ports.
    pub fn wizard_session(&self) -> WizardSession {
        WizardSession::new(self.catalog.clone(), self.clock.clone(), self.ids.clone())
    }
}
