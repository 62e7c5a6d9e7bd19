//! Domain Events
//!
//! Return types from aggregate mutations, communicating what happened when
//! wizard or draft state was modified. Selection rules never raise errors
//! during editing; a refused selection is reported here instead.

pub mod wizard_events;

pub use wizard_events::*;
