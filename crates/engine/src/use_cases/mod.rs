//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area.
//! Use cases orchestrate the domain aggregates, the roster and the ports.

pub mod build_sheet;
pub mod roster;
pub mod wizard;

// Re-export main types
pub use build_sheet::{BuildOutcome, BuildSheet, BuildSheetError, IgnoredChoice};
pub use roster::{RosterEntry, RosterUseCase};
pub use wizard::{CommitOutcome, WizardError, WizardSession};
