//! Herosmith domain
//!
//! Pure character-building rules: the reference catalog, ability score,
//! feat slot and tier rules, per-step selection validation, and the
//! wizard/draft/character aggregates. No I/O and no logging.

pub mod aggregates;
pub mod catalog;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod rules;
pub mod validation;
pub mod value_objects;

pub use aggregates::{Character, Draft, DraftCharacter, Wizard};
pub use catalog::{Catalog, CatalogData, CatalogError, CatalogWarning};
pub use entities::{
    ClassDef, ClassPicks, FeatDef, FeatTier, FeatureDef, FeatureKind, FeatureUsage, KinDef,
    KinFeatGrant, KinPower, KinPowerUsage, RulesHook,
};
pub use error::DomainError;
pub use events::{
    ChoiceChange, DraftStart, FinalizeOutcome, SelectionBlock, SelectionChange, StepTransition,
};
pub use ids::CharacterId;
pub use rules::{AbilityScoreError, FeatSlots};
pub use validation::{ReviewReport, StepValidation, UnmetRequirement};
pub use value_objects::{
    AbilityKey, AbilityScores, CharacterName, Equipment, FeaturePicks, HitPoints, Level,
    PlayState, WizardStep,
};
