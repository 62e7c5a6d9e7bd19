//! Wizard and draft mutation outcomes

use crate::aggregates::Character;
use crate::ids::CharacterId;
use crate::validation::{ReviewReport, StepValidation};
use crate::value_objects::WizardStep;

/// Why a selection was left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionBlock {
    /// A kin power was toggled before a kin was chosen
    NoKin,
    /// A feature was toggled before a class was chosen
    NoClass,
    /// The choice is unknown or not available given earlier choices
    NotOffered,
    /// The bucket already holds as many choices as allowed
    CapacityReached,
}

/// Outcome of toggling a kin power, feature pick, feat or boost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Selected,
    Deselected,
    /// Selection refused; the draft is unchanged
    Ignored(SelectionBlock),
}

impl SelectionChange {
    pub fn changed(&self) -> bool {
        !matches!(self, SelectionChange::Ignored(_))
    }
}

/// Outcome of choosing a kin or class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceChange {
    Changed {
        previous: Option<String>,
        /// Dependent selections dropped by the change
        cleared: usize,
    },
    Unchanged,
}

/// Outcome of starting a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftStart {
    Started(CharacterId),
    /// A draft already exists; nothing was changed
    AlreadyStarted(CharacterId),
}

impl DraftStart {
    pub fn id(&self) -> CharacterId {
        match self {
            DraftStart::Started(id) | DraftStart::AlreadyStarted(id) => *id,
        }
    }
}

/// Outcome of moving between wizard steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepTransition {
    Advanced { from: WizardStep, to: WizardStep },
    Retreated { from: WizardStep, to: WizardStep },
    /// The current step is not satisfied; nothing moved
    Blocked(StepValidation),
    /// Already at the last step
    AtEnd,
    /// Already at the first step
    AtStart,
}

/// Outcome of finalizing a draft.
#[derive(Debug, Clone, PartialEq)]
pub enum FinalizeOutcome {
    Committed(Box<Character>),
    /// The review gate failed; draft and step are untouched
    Rejected(ReviewReport),
}
