//! Wizard aggregate - the step machine around a draft
//!
//! Steps run in a fixed order. Advancing is gated on the current step's
//! validator; going back is always allowed and never clears data. Finalizing
//! re-runs every validator, since going back can invalidate later steps.

use chrono::{DateTime, Utc};

use super::character::Character;
use super::draft::{Draft, DraftCharacter};
use crate::catalog::Catalog;
use crate::error::DomainError;
use crate::events::{DraftStart, FinalizeOutcome, StepTransition};
use crate::ids::CharacterId;
use crate::validation::{self, StepValidation, UnmetRequirement};
use crate::value_objects::WizardStep;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wizard {
    step: WizardStep,
    draft: Draft,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// The draft in progress, if any.
    pub fn current(&self) -> Option<&DraftCharacter> {
        self.draft.as_character()
    }

    pub fn current_mut(&mut self) -> Option<&mut DraftCharacter> {
        self.draft.as_character_mut()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Begin a draft. A no-op while one is already in progress, so hosts may
    /// call this on every setup.
    pub fn start(&mut self, id: CharacterId, now: DateTime<Utc>) -> DraftStart {
        if let Some(existing) = self.draft.as_character() {
            return DraftStart::AlreadyStarted(existing.id());
        }
        self.draft = Draft::InProgress(Box::new(DraftCharacter::new(id, now)));
        self.step = WizardStep::first();
        DraftStart::Started(id)
    }

    /// Throw the draft away and return to the first step.
    pub fn discard(&mut self) -> Option<DraftCharacter> {
        self.step = WizardStep::first();
        self.draft.take()
    }

    /// Turn the draft into a character if every step validates.
    ///
    /// On success the draft is cleared and the wizard returns to the first
    /// step. On rejection nothing changes.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` if no draft was started.
    pub fn finalize(
        &mut self,
        catalog: &Catalog,
        now: DateTime<Utc>,
    ) -> Result<FinalizeOutcome, DomainError> {
        let draft = self.draft.as_character().ok_or_else(|| {
            DomainError::invalid_state_transition("Cannot finalize: no draft has been started")
        })?;

        match Character::from_draft(draft, catalog, now) {
            Ok(character) => {
                self.draft = Draft::Empty;
                self.step = WizardStep::first();
                Ok(FinalizeOutcome::Committed(Box::new(character)))
            }
            Err(report) => Ok(FinalizeOutcome::Rejected(report)),
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Validate the current step.
    pub fn validate_current(&self, catalog: &Catalog) -> StepValidation {
        match self.draft.as_character() {
            Some(draft) => validation::validate_step(self.step, draft, catalog),
            None => StepValidation::new(
                self.step,
                vec![UnmetRequirement::new("draft", "No draft has been started")],
            ),
        }
    }

    /// Advance one step if the current step validates.
    pub fn next(&mut self, catalog: &Catalog) -> StepTransition {
        let Some(to) = self.step.next() else {
            return StepTransition::AtEnd;
        };
        let validation = self.validate_current(catalog);
        if !validation.is_valid() {
            return StepTransition::Blocked(validation);
        }
        let from = std::mem::replace(&mut self.step, to);
        StepTransition::Advanced { from, to }
    }

    /// Go back one step. Never clears data.
    pub fn back(&mut self) -> StepTransition {
        let Some(to) = self.step.previous() else {
            return StepTransition::AtStart;
        };
        let from = std::mem::replace(&mut self.step, to);
        StepTransition::Retreated { from, to }
    }
}
