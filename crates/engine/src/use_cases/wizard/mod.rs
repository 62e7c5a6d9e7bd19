//! Character creation wizard use case.
//!
//! Wraps the domain [`Wizard`] with a clock and an id source, stamps every
//! draft edit that changes something, and commits finished characters
//! straight into the roster.

mod error;

pub use error::WizardError;

use std::sync::Arc;

use herosmith_domain::{
    AbilityKey, Catalog, CharacterId, ChoiceChange, DraftCharacter, DraftStart, Equipment,
    FeatureKind, FinalizeOutcome, ReviewReport, SelectionChange, StepTransition, StepValidation,
    Wizard, WizardStep,
};

use crate::infrastructure::ports::{ClockPort, IdPort};
use crate::repositories::{CharacterRepository, PersistOutcome};

// =============================================================================
// Result Types
// =============================================================================

/// Result of committing the draft.
#[derive(Debug)]
pub enum CommitOutcome {
    /// The character is in the roster. `persistence` says whether it also
    /// reached storage.
    Committed {
        character_id: CharacterId,
        persistence: PersistOutcome,
    },
    /// At least one step failed review. The draft and step are unchanged.
    Rejected(ReviewReport),
}

// =============================================================================
// Session
// =============================================================================

pub struct WizardSession {
    wizard: Wizard,
    catalog: Arc<Catalog>,
    clock: Arc<dyn ClockPort>,
    ids: Arc<dyn IdPort>,
}

impl WizardSession {
    pub fn new(catalog: Arc<Catalog>, clock: Arc<dyn ClockPort>, ids: Arc<dyn IdPort>) -> Self {
        Self {
            wizard: Wizard::new(),
            catalog,
            clock,
            ids,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn step(&self) -> WizardStep {
        self.wizard.step()
    }

    pub fn draft(&self) -> Option<&DraftCharacter> {
        self.wizard.current()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Start a draft with a fresh id. Does nothing while a draft exists.
    pub fn start(&mut self) -> DraftStart {
        let outcome = self
            .wizard
            .start(CharacterId::from_uuid(self.ids.next_id()), self.clock.now());
        if let DraftStart::Started(id) = outcome {
            tracing::info!(character_id = %id, "Draft started");
        }
        outcome
    }

    pub fn discard(&mut self) -> Option<DraftCharacter> {
        let discarded = self.wizard.discard();
        if let Some(draft) = &discarded {
            tracing::info!(character_id = %draft.id(), "Draft discarded");
        }
        discarded
    }

    /// Finalize the draft and upsert the result in one call.
    ///
    /// A rejected draft leaves both the wizard and the roster untouched.
    pub fn commit(&mut self, roster: &mut CharacterRepository) -> Result<CommitOutcome, WizardError> {
        if self.wizard.draft().is_empty() {
            return Err(WizardError::NoDraft);
        }

        match self.wizard.finalize(&self.catalog, self.clock.now())? {
            FinalizeOutcome::Committed(character) => {
                let character_id = character.id();
                let persistence = roster.upsert(*character);
                tracing::info!(
                    character_id = %character_id,
                    saved = persistence.is_saved(),
                    "Committed character"
                );
                Ok(CommitOutcome::Committed {
                    character_id,
                    persistence,
                })
            }
            FinalizeOutcome::Rejected(report) => {
                tracing::debug!(failing = report.failing_steps().count(), "Commit rejected");
                Ok(CommitOutcome::Rejected(report))
            }
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn validate_current(&self) -> StepValidation {
        self.wizard.validate_current(&self.catalog)
    }

    pub fn next(&mut self) -> StepTransition {
        let transition = self.wizard.next(&self.catalog);
        if let StepTransition::Advanced { from, to } = &transition {
            tracing::debug!(%from, %to, "Wizard advanced");
        }
        transition
    }

    pub fn back(&mut self) -> StepTransition {
        self.wizard.back()
    }

    // =========================================================================
    // Draft Edits
    // =========================================================================

    /// Apply an edit to the draft.
    ///
    /// The update time is stamped only when the edit changed the draft;
    /// refused toggles and no-op setters leave it alone.
    pub fn edit<R>(
        &mut self,
        f: impl FnOnce(&mut DraftCharacter, &Catalog) -> R,
    ) -> Result<R, WizardError> {
        let catalog: &Catalog = &self.catalog;
        let draft = self.wizard.current_mut().ok_or(WizardError::NoDraft)?;
        let before = draft.clone();
        let result = f(draft, catalog);
        if *draft != before {
            draft.touch(self.clock.now());
        }
        Ok(result)
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), WizardError> {
        self.edit(|d, _| d.set_name(name))
    }

    pub fn set_level(&mut self, level: u8) -> Result<(), WizardError> {
        self.edit(|d, _| d.set_level(level))
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) -> Result<(), WizardError> {
        self.edit(|d, _| d.set_notes(notes))
    }

    pub fn assign_score(&mut self, key: AbilityKey, value: Option<i32>) -> Result<(), WizardError> {
        self.edit(|d, _| d.assign_score(key, value))
    }

    pub fn toggle_boost(&mut self, key: AbilityKey) -> Result<SelectionChange, WizardError> {
        self.edit(|d, _| d.toggle_boost(key))
    }

    pub fn set_kin(&mut self, kin_id: &str) -> Result<ChoiceChange, WizardError> {
        self.edit(|d, _| d.set_kin(kin_id))
    }

    pub fn toggle_kin_power(&mut self, power_id: &str) -> Result<SelectionChange, WizardError> {
        self.edit(|d, catalog| d.toggle_kin_power(power_id, catalog))
    }

    pub fn set_class(&mut self, class_id: &str) -> Result<ChoiceChange, WizardError> {
        self.edit(|d, _| d.set_class(class_id))
    }

    pub fn toggle_pick(
        &mut self,
        kind: FeatureKind,
        feature_id: &str,
    ) -> Result<SelectionChange, WizardError> {
        self.edit(|d, catalog| d.toggle_pick(kind, feature_id, catalog))
    }

    pub fn toggle_feat(&mut self, feat_id: &str) -> Result<SelectionChange, WizardError> {
        self.edit(|d, catalog| d.toggle_feat(feat_id, catalog))
    }

    pub fn set_equipment(&mut self, equipment: Equipment) -> Result<(), WizardError> {
        self.edit(|d, _| d.set_equipment(equipment))
    }
}
