//! Wizard steps in their fixed order.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WizardStep {
    #[default]
    Basics,
    AbilityScores,
    Kin,
    Class,
    TalentsPowers,
    Feats,
    Equipment,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 8] = [
        WizardStep::Basics,
        WizardStep::AbilityScores,
        WizardStep::Kin,
        WizardStep::Class,
        WizardStep::TalentsPowers,
        WizardStep::Feats,
        WizardStep::Equipment,
        WizardStep::Review,
    ];

    pub fn first() -> Self {
        WizardStep::Basics
    }

    /// Zero-based position in the wizard.
    pub fn index(self) -> usize {
        WizardStep::ALL
            .iter()
            .position(|step| *step == self)
            .unwrap_or_default()
    }

    pub fn next(self) -> Option<Self> {
        WizardStep::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(self) -> Option<Self> {
        self.index()
            .checked_sub(1)
            .and_then(|i| WizardStep::ALL.get(i).copied())
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Basics => "Basics",
            WizardStep::AbilityScores => "Ability Scores",
            WizardStep::Kin => "Kin",
            WizardStep::Class => "Class",
            WizardStep::TalentsPowers => "Talents & Powers",
            WizardStep::Feats => "Feats",
            WizardStep::Equipment => "Equipment",
            WizardStep::Review => "Review",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}
