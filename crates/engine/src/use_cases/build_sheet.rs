//! Scripted character creation from a JSON build sheet.
//!
//! A build sheet lists every choice up front. The runner feeds them through a
//! [`WizardSession`] one step at a time, exactly as an interactive user would,
//! so the same gating applies: a step that does not validate stops the run.

use std::collections::BTreeMap;

use serde::Deserialize;

use herosmith_domain::{
    AbilityKey, CharacterId, Equipment, FeatureKind, ReviewReport, SelectionBlock,
    SelectionChange, StepTransition, StepValidation, WizardStep,
};

use super::wizard::{CommitOutcome, WizardError, WizardSession};
use crate::repositories::{CharacterRepository, PersistOutcome};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSheet {
    pub name: String,
    #[serde(default = "default_level")]
    pub level: u8,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub ability_scores: BTreeMap<AbilityKey, i32>,
    #[serde(default)]
    pub boosts: Vec<AbilityKey>,
    #[serde(default)]
    pub kin: Option<String>,
    #[serde(default)]
    pub kin_powers: Vec<String>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub talents: Vec<String>,
    #[serde(default)]
    pub powers: Vec<String>,
    #[serde(default)]
    pub spells: Vec<String>,
    #[serde(default)]
    pub maneuvers: Vec<String>,
    #[serde(default)]
    pub feats: Vec<String>,
    #[serde(default)]
    pub equipment: Equipment,
}

fn default_level() -> u8 {
    1
}

impl BuildSheet {
    pub fn from_json(data: &str) -> Result<Self, BuildSheetError> {
        serde_json::from_str(data).map_err(|e| BuildSheetError::Parse(e.to_string()))
    }

    fn picks(&self, kind: FeatureKind) -> &[String] {
        match kind {
            FeatureKind::Talent => &self.talents,
            FeatureKind::Power => &self.powers,
            FeatureKind::Spell => &self.spells,
            FeatureKind::Maneuver => &self.maneuvers,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BuildSheetError {
    #[error("Invalid build sheet: {0}")]
    Parse(String),

    #[error("A draft is already in progress")]
    DraftInProgress,

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),
}

/// A choice from the sheet that the wizard refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredChoice {
    pub step: WizardStep,
    pub id: String,
    pub reason: SelectionBlock,
}

#[derive(Debug)]
pub enum BuildOutcome {
    Committed {
        character_id: CharacterId,
        persistence: PersistOutcome,
        ignored: Vec<IgnoredChoice>,
    },
    /// The run stopped at a step that did not validate. The draft is discarded.
    Blocked {
        validation: StepValidation,
        ignored: Vec<IgnoredChoice>,
    },
    Rejected {
        report: ReviewReport,
        ignored: Vec<IgnoredChoice>,
    },
}

/// Run `sheet` through `session` and commit the result into `roster`.
///
/// The session must not hold a draft. On any outcome other than
/// `Committed` the draft is discarded, leaving the session clean.
pub fn run(
    sheet: &BuildSheet,
    session: &mut WizardSession,
    roster: &mut CharacterRepository,
) -> Result<BuildOutcome, BuildSheetError> {
    if session.draft().is_some() {
        return Err(BuildSheetError::DraftInProgress);
    }
    session.start();

    let mut ignored = Vec::new();
    while session.step() != WizardStep::Review {
        let step = session.step();
        apply_step(sheet, step, session, &mut ignored)?;

        match session.next() {
            StepTransition::Advanced { .. } => {}
            StepTransition::Blocked(validation) => {
                tracing::info!(%step, unmet = validation.unmet.len(), "Build sheet blocked");
                session.discard();
                return Ok(BuildOutcome::Blocked {
                    validation,
                    ignored,
                });
            }
            // Review is the only step without a successor, and the loop stops before it.
            StepTransition::AtEnd | StepTransition::AtStart | StepTransition::Retreated { .. } => {
                break;
            }
        }
    }

    match session.commit(roster)? {
        CommitOutcome::Committed {
            character_id,
            persistence,
        } => Ok(BuildOutcome::Committed {
            character_id,
            persistence,
            ignored,
        }),
        CommitOutcome::Rejected(report) => {
            session.discard();
            Ok(BuildOutcome::Rejected { report, ignored })
        }
    }
}

fn apply_step(
    sheet: &BuildSheet,
    step: WizardStep,
    session: &mut WizardSession,
    ignored: &mut Vec<IgnoredChoice>,
) -> Result<(), WizardError> {
    let mut note = |id: &str, change: SelectionChange| {
        if let SelectionChange::Ignored(reason) = change {
            ignored.push(IgnoredChoice {
                step,
                id: id.to_string(),
                reason,
            });
        }
    };

    match step {
        WizardStep::Basics => {
            session.set_name(sheet.name.as_str())?;
            session.set_level(sheet.level)?;
            session.set_notes(sheet.notes.as_str())?;
        }
        WizardStep::AbilityScores => {
            for (key, value) in &sheet.ability_scores {
                session.assign_score(*key, Some(*value))?;
            }
            for key in &sheet.boosts {
                let change = session.toggle_boost(*key)?;
                note(key.abbreviation(), change);
            }
        }
        WizardStep::Kin => {
            if let Some(kin) = &sheet.kin {
                session.set_kin(kin)?;
            }
            for power in &sheet.kin_powers {
                let change = session.toggle_kin_power(power)?;
                note(power, change);
            }
        }
        WizardStep::Class => {
            if let Some(class) = &sheet.class {
                session.set_class(class)?;
            }
        }
        WizardStep::TalentsPowers => {
            for kind in FeatureKind::ALL {
                for id in sheet.picks(kind) {
                    let change = session.toggle_pick(kind, id)?;
                    note(id, change);
                }
            }
        }
        WizardStep::Feats => {
            for id in &sheet.feats {
                let change = session.toggle_feat(id)?;
                note(id, change);
            }
        }
        WizardStep::Equipment => {
            session.set_equipment(sheet.equipment.clone())?;
        }
        WizardStep::Review => {}
    }
    Ok(())
}
