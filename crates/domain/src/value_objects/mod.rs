//! Value objects - Immutable objects defined by their attributes

mod abilities;
mod equipment;
mod level;
mod names;
mod picks;
mod play_state;
mod step;

pub use abilities::{ability_modifier, AbilityKey, AbilityScores};
pub use equipment::Equipment;
pub use level::Level;
pub use names::{CharacterName, MAX_NAME_LENGTH};
pub use picks::FeaturePicks;
pub use play_state::{Defenses, HitPoints, PlayState, UsageState};
pub use step::WizardStep;
