//! Selection validator - per-step checks over a draft
//!
//! Validators are pure and cheap: callers re-run them on every change rather
//! than caching results. A failed check is a value, never an error, because
//! the user is mid-edit and can always fix it.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::aggregates::DraftCharacter;
use crate::catalog::Catalog;
use crate::entities::{FeatTier, FeatureKind};
use crate::error::DomainError;
use crate::rules::{self, REQUIRED_BOOSTS};
use crate::value_objects::{AbilityScores, CharacterName, Level, WizardStep};

/// One reason a step cannot be completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmetRequirement {
    /// Draft field the problem is about ("name", "talents", "feats", ...)
    pub field: String,
    pub message: String,
}

impl UnmetRequirement {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for UnmetRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of validating one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepValidation {
    pub step: WizardStep,
    pub unmet: Vec<UnmetRequirement>,
}

impl StepValidation {
    pub fn new(step: WizardStep, unmet: Vec<UnmetRequirement>) -> Self {
        Self { step, unmet }
    }

    pub fn is_valid(&self) -> bool {
        self.unmet.is_empty()
    }

    /// Whether any unmet requirement names this field.
    pub fn mentions(&self, field: &str) -> bool {
        self.unmet.iter().any(|u| u.field == field)
    }
}

/// Result of re-running every step validator before commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewReport {
    pub steps: Vec<StepValidation>,
}

impl ReviewReport {
    pub fn is_valid(&self) -> bool {
        self.steps.iter().all(StepValidation::is_valid)
    }

    pub fn failing_steps(&self) -> impl Iterator<Item = &StepValidation> {
        self.steps.iter().filter(|s| !s.is_valid())
    }

    pub fn unmet(&self) -> impl Iterator<Item = &UnmetRequirement> {
        self.steps.iter().flat_map(|s| s.unmet.iter())
    }

    /// A report with a single failing requirement.
    pub fn single(step: WizardStep, field: &str, message: impl Into<String>) -> Self {
        Self {
            steps: vec![StepValidation::new(
                step,
                vec![UnmetRequirement::new(field, message)],
            )],
        }
    }
}

impl fmt::Display for ReviewReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in self.failing_steps() {
            for unmet in &step.unmet {
                writeln!(f, "[{}] {}", step.step, unmet)?;
            }
        }
        Ok(())
    }
}

/// Validate the step the wizard is on. `Review` runs every other step.
pub fn validate_step(step: WizardStep, draft: &DraftCharacter, catalog: &Catalog) -> StepValidation {
    match step {
        WizardStep::Basics => validate_basics(draft),
        WizardStep::AbilityScores => validate_ability_scores(draft),
        WizardStep::Kin => validate_kin(draft, catalog),
        WizardStep::Class => validate_class(draft, catalog),
        WizardStep::TalentsPowers => validate_picks(draft, catalog),
        WizardStep::Feats => validate_feats(draft, catalog),
        WizardStep::Equipment => StepValidation::new(WizardStep::Equipment, Vec::new()),
        WizardStep::Review => {
            let unmet = review(draft, catalog).unmet().cloned().collect();
            StepValidation::new(WizardStep::Review, unmet)
        }
    }
}

/// Re-run every step validator against the draft.
pub fn review(draft: &DraftCharacter, catalog: &Catalog) -> ReviewReport {
    let steps = WizardStep::ALL
        .into_iter()
        .filter(|step| *step != WizardStep::Review)
        .map(|step| validate_step(step, draft, catalog))
        .collect();
    ReviewReport { steps }
}

pub fn validate_basics(draft: &DraftCharacter) -> StepValidation {
    let mut unmet = Vec::new();
    if let Err(e) = CharacterName::new(draft.name()) {
        unmet.push(UnmetRequirement::new("name", reason(e)));
    }
    if let Err(e) = Level::new(draft.level()) {
        unmet.push(UnmetRequirement::new("level", reason(e)));
    }
    StepValidation::new(WizardStep::Basics, unmet)
}

pub fn validate_ability_scores(draft: &DraftCharacter) -> StepValidation {
    let mut unmet = Vec::new();
    if let Err(problems) = rules::check_assignment(draft.base_scores()) {
        unmet.extend(
            problems
                .iter()
                .map(|p| UnmetRequirement::new("abilityScores", p.to_string())),
        );
    }
    let boosts = draft.boosts();
    if boosts.len() != REQUIRED_BOOSTS {
        unmet.push(UnmetRequirement::new(
            "boosts",
            format!(
                "Choose exactly {} abilities to boost ({} chosen)",
                REQUIRED_BOOSTS,
                boosts.len()
            ),
        ));
    } else if let Err(e) = rules::apply_boosts(&AbilityScores::default(), boosts) {
        unmet.push(UnmetRequirement::new("boosts", e.to_string()));
    }
    StepValidation::new(WizardStep::AbilityScores, unmet)
}

pub fn validate_kin(draft: &DraftCharacter, catalog: &Catalog) -> StepValidation {
    let mut unmet = Vec::new();
    let kin = match draft.kin_id() {
        None => {
            unmet.push(UnmetRequirement::new("kin", "Choose a kin"));
            None
        }
        Some(id) => {
            let kin = catalog.kin(id);
            if kin.is_none() {
                unmet.push(UnmetRequirement::new("kin", format!("Unknown kin: {}", id)));
            }
            kin
        }
    };

    if let Some(kin) = kin {
        for power_id in draft.kin_power_ids() {
            if kin.power(power_id).is_none() {
                unmet.push(UnmetRequirement::new(
                    "kinPowers",
                    format!("{} is not a {} power", power_id, kin.name),
                ));
            }
        }
        unmet.extend(duplicates("kinPowers", draft.kin_power_ids()));
        let chosen = draft.kin_power_ids().len();
        if chosen != usize::from(kin.required_picks) {
            unmet.push(UnmetRequirement::new(
                "kinPowers",
                format!(
                    "Choose exactly {} {} power(s) ({} chosen)",
                    kin.required_picks, kin.name, chosen
                ),
            ));
        }
    }

    StepValidation::new(WizardStep::Kin, unmet)
}

pub fn validate_class(draft: &DraftCharacter, catalog: &Catalog) -> StepValidation {
    let mut unmet = Vec::new();
    match draft.class_id() {
        None => unmet.push(UnmetRequirement::new("class", "Choose a class")),
        Some(id) if catalog.class(id).is_none() => {
            unmet.push(UnmetRequirement::new("class", format!("Unknown class: {}", id)))
        }
        Some(_) => {}
    }
    StepValidation::new(WizardStep::Class, unmet)
}

/// Talents, powers, spells and maneuvers: each bucket holds exactly the
/// class's required count of that class's features of that kind.
pub fn validate_picks(draft: &DraftCharacter, catalog: &Catalog) -> StepValidation {
    let Some(class) = draft.class_id().and_then(|id| catalog.class(id)) else {
        return StepValidation::new(
            WizardStep::TalentsPowers,
            vec![UnmetRequirement::new("class", "Choose a class first")],
        );
    };

    let mut unmet = Vec::new();
    for kind in FeatureKind::ALL {
        let field = kind.bucket_name();
        let chosen = draft.picks().bucket(kind);
        let required = usize::from(class.picks.required(kind));

        for id in chosen {
            match catalog.feature(id) {
                None => unmet.push(UnmetRequirement::new(field, format!("Unknown feature: {}", id))),
                Some(feature) if feature.class_id != class.id => unmet.push(UnmetRequirement::new(
                    field,
                    format!("{} is not a {} feature", feature.name, class.name),
                )),
                Some(feature) if feature.kind != kind => unmet.push(UnmetRequirement::new(
                    field,
                    format!("{} is a {}, not a {}", feature.name, feature.kind, kind),
                )),
                Some(_) => {}
            }
        }
        unmet.extend(duplicates(field, chosen));

        if chosen.len() != required {
            unmet.push(UnmetRequirement::new(
                field,
                format!("Choose exactly {} {} ({} chosen)", required, field, chosen.len()),
            ));
        }
    }

    StepValidation::new(WizardStep::TalentsPowers, unmet)
}

/// Feats: each chosen feat is offered (tier, ownership, prerequisite) and no
/// tier holds more feats than it has slots.
pub fn validate_feats(draft: &DraftCharacter, catalog: &Catalog) -> StepValidation {
    let Ok(level) = Level::new(draft.level()) else {
        return StepValidation::new(
            WizardStep::Feats,
            vec![UnmetRequirement::new(
                "level",
                "Set a valid level before choosing feats",
            )],
        );
    };
    let tiers = rules::allowed_tiers(level);
    let slots = rules::feat_slots(level, &draft.rules_hooks(catalog));

    let mut unmet = Vec::new();
    let mut per_tier: BTreeMap<FeatTier, usize> = BTreeMap::new();

    for id in draft.feat_ids() {
        let Some(feat) = catalog.feat(id) else {
            unmet.push(UnmetRequirement::new("feats", format!("Unknown feat: {}", id)));
            continue;
        };
        *per_tier.entry(feat.tier).or_default() += 1;

        if !tiers.contains(&feat.tier) {
            unmet.push(UnmetRequirement::new(
                "feats",
                format!(
                    "{} is a {} feat, which level {} has not unlocked",
                    feat.name, feat.tier, level
                ),
            ));
        }
        if !feat.is_available_to(draft.class_id()) {
            unmet.push(UnmetRequirement::new(
                "feats",
                format!("{} belongs to another class", feat.name),
            ));
        }
        if !draft.prerequisite_met(feat) {
            let required = feat.requires_feature_id.as_deref().unwrap_or_default();
            unmet.push(UnmetRequirement::new(
                "feats",
                format!("{} requires the feature {}", feat.name, required),
            ));
        }
    }
    unmet.extend(duplicates("feats", draft.feat_ids()));

    for (tier, used) in per_tier {
        let available = usize::from(slots.get(tier));
        if used > available {
            unmet.push(UnmetRequirement::new(
                "feats",
                format!("Too many {} feats ({} of {} slots)", tier, used, available),
            ));
        }
    }

    StepValidation::new(WizardStep::Feats, unmet)
}

fn reason(error: DomainError) -> String {
    match error {
        DomainError::Validation(message) => message,
        other => other.to_string(),
    }
}

fn duplicates(field: &str, ids: &[String]) -> Vec<UnmetRequirement> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    ids.iter()
        .filter(|id| !seen.insert(id.as_str()) && reported.insert(id.as_str()))
        .map(|id| UnmetRequirement::new(field, format!("{} chosen more than once", id)))
        .collect()
}
