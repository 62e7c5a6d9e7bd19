//! Aggregates - consistency boundaries with encapsulated state
//!
//! - [`Wizard`] owns the step machine and the [`Draft`]
//! - [`Character`] is the validated result of finalizing a draft

pub mod character;
pub mod draft;
pub mod wizard;

pub use character::Character;
pub use draft::{Draft, DraftCharacter};
pub use wizard::Wizard;
