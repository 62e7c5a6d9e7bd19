//! Herosmith Engine library.
//!
//! Everything around the pure rules in `herosmith-domain`: storage, the
//! character roster, wizard sessions and the CLI host.
//!
//! ## Structure
//!
//! - `infrastructure/` - Port traits and their adapters (storage, clock, ids, catalog files)
//! - `repositories/` - The persisted character roster
//! - `use_cases/` - Wizard sessions, roster view, build sheets
//! - `config` - Environment configuration
//! - `app` - Application composition

pub mod app;
pub mod config;
pub mod infrastructure;
pub mod repositories;
pub mod use_cases;

/// Test fixtures shared by the in-module tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
pub use config::Config;
