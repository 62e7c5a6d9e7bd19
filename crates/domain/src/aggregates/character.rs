//! Character aggregate - a finished, committed character
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: all fields are encapsulated
//! - **Newtypes**: `CharacterName` and `Level` for validated basics
//! - **Valid by construction**: the only constructor is [`Character::from_draft`],
//!   which re-runs the review gate before assembling anything

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::draft::DraftCharacter;
use crate::catalog::Catalog;
use crate::entities::{FeatTier, RulesHook};
use crate::rules::{self, FeatSlots, InitiativeRoll};
use crate::validation::{self, ReviewReport};
use crate::value_objects::{
    AbilityKey, AbilityScores, CharacterName, Equipment, FeaturePicks, Level, PlayState,
    WizardStep,
};
use crate::CharacterId;

/// A committed character.
///
/// # Invariants
///
/// - `base_scores` is a permutation of the default array
/// - `ability_scores` equals `base_scores` plus the boost on exactly the two `boosts` keys
/// - kin powers, class picks and feats satisfied the review gate at commit time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    // Identity
    id: CharacterId,
    name: CharacterName,
    level: Level,
    #[serde(default)]
    notes: String,

    // Abilities
    base_scores: AbilityScores,
    boosts: [AbilityKey; 2],
    ability_scores: AbilityScores,

    // Kin
    kin_id: String,
    kin_power_ids: Vec<String>,

    // Class
    class_id: String,
    picks: FeaturePicks,
    feat_ids: Vec<String>,

    #[serde(default)]
    equipment: Equipment,
    #[serde(default)]
    play_state: PlayState,

    // Metadata
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Character {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Build a character from a draft that passes review.
    ///
    /// `now` becomes the update timestamp; the draft's creation time is kept.
    /// Play state starts empty.
    ///
    /// # Errors
    ///
    /// Returns the [`ReviewReport`] if any step fails.
    pub fn from_draft(
        draft: &DraftCharacter,
        catalog: &Catalog,
        now: DateTime<Utc>,
    ) -> Result<Self, ReviewReport> {
        let report = validation::review(draft, catalog);
        if !report.is_valid() {
            return Err(report);
        }

        let name = CharacterName::new(draft.name())
            .map_err(|e| ReviewReport::single(WizardStep::Basics, "name", e.to_string()))?;
        let level = Level::new(draft.level())
            .map_err(|e| ReviewReport::single(WizardStep::Basics, "level", e.to_string()))?;
        let base_scores = rules::check_assignment(draft.base_scores()).map_err(|problems| {
            let message = problems
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            ReviewReport::single(WizardStep::AbilityScores, "abilityScores", message)
        })?;
        let boost_error = |e: String| ReviewReport::single(WizardStep::AbilityScores, "boosts", e);
        let ability_scores = rules::apply_boosts(&base_scores, draft.boosts())
            .map_err(|e| boost_error(e.to_string()))?;
        let boosts: [AbilityKey; 2] = draft
            .boosts()
            .try_into()
            .map_err(|_| boost_error("Exactly 2 boosts are required".to_string()))?;
        let kin_id = draft
            .kin_id()
            .ok_or_else(|| ReviewReport::single(WizardStep::Kin, "kin", "Choose a kin"))?;
        let class_id = draft
            .class_id()
            .ok_or_else(|| ReviewReport::single(WizardStep::Class, "class", "Choose a class"))?;

        Ok(Self {
            id: draft.id(),
            name,
            level,
            notes: draft.notes().to_string(),
            base_scores,
            boosts,
            ability_scores,
            kin_id: kin_id.to_string(),
            kin_power_ids: draft.kin_power_ids().to_vec(),
            class_id: class_id.to_string(),
            picks: draft.picks().clone(),
            feat_ids: draft.feat_ids().to_vec(),
            equipment: draft.equipment().clone(),
            play_state: PlayState::default(),
            created_at: draft.created_at(),
            updated_at: now,
        })
    }

    // =========================================================================
    // Identity Accessors
    // =========================================================================

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn name(&self) -> &CharacterName {
        &self.name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    // =========================================================================
    // Ability Accessors
    // =========================================================================

    /// Scores before boosts.
    pub fn base_scores(&self) -> &AbilityScores {
        &self.base_scores
    }

    pub fn boosts(&self) -> [AbilityKey; 2] {
        self.boosts
    }

    /// Final scores with boosts applied.
    pub fn ability_scores(&self) -> &AbilityScores {
        &self.ability_scores
    }

    pub fn modifier(&self, key: AbilityKey) -> i32 {
        self.ability_scores.modifier(key)
    }

    // =========================================================================
    // Choice Accessors
    // =========================================================================

    pub fn kin_id(&self) -> &str {
        &self.kin_id
    }

    pub fn kin_power_ids(&self) -> &[String] {
        &self.kin_power_ids
    }

    pub fn class_id(&self) -> &str {
        &self.class_id
    }

    pub fn picks(&self) -> &FeaturePicks {
        &self.picks
    }

    pub fn feat_ids(&self) -> &[String] {
        &self.feat_ids
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    // =========================================================================
    // Rules
    // =========================================================================

    pub fn rules_hooks(&self, catalog: &Catalog) -> BTreeSet<RulesHook> {
        rules::active_hooks(catalog, &self.kin_power_ids)
    }

    pub fn feat_slots(&self, catalog: &Catalog) -> FeatSlots {
        rules::feat_slots(self.level, &self.rules_hooks(catalog))
    }

    /// Resolve this character's initiative from modified rolls.
    pub fn initiative(&self, catalog: &Catalog, first: i32, second: Option<i32>) -> InitiativeRoll {
        rules::resolve_initiative(&self.rules_hooks(catalog), first, second)
    }

    /// Defense bonus for the first round of a battle.
    ///
    /// Needs a chosen power with the best-of-two hook whose adventurer feat
    /// grant is unlocked at this level.
    pub fn first_round_defense_bonus(
        &self,
        catalog: &Catalog,
        initiative: i32,
        enemy_initiatives: &[i32],
    ) -> i32 {
        let hook = RulesHook::InitiativeBestOfTwo;
        let has_feat = self.has_kin_feat(catalog, hook, FeatTier::Adventurer);
        rules::first_round_defense_bonus(
            &self.rules_hooks(catalog),
            has_feat,
            initiative,
            enemy_initiatives,
        )
    }

    fn has_kin_feat(&self, catalog: &Catalog, hook: RulesHook, tier: FeatTier) -> bool {
        if !rules::allowed_tiers(self.level).contains(&tier) {
            return false;
        }
        self.kin_power_ids
            .iter()
            .filter_map(|id| catalog.kin_power(id))
            .filter(|(_, power)| power.rules_hook == Some(hook))
            .any(|(_, power)| power.feats.iter().any(|grant| grant.tier == tier))
    }

    // =========================================================================
    // Play State
    // =========================================================================

    pub fn play_state(&self) -> &PlayState {
        &self.play_state
    }

    // =========================================================================
    // Timestamps
    // =========================================================================

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Set the update timestamp. The repository calls this on every save.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::complete_wizard_draft;
    use super::*;
    use chrono::TimeZone;

    fn times() -> (DateTime<Utc>, DateTime<Utc>) {
        (
            Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 2, 1, 9, 30, 0).unwrap(),
        )
    }

    #[test]
    fn finalized_character_has_boosted_scores_and_empty_play_state() {
        let (created, committed) = times();
        let draft = complete_wizard_draft(CharacterId::new(), created);
        let character = Character::from_draft(&draft, &Catalog::core(), committed).unwrap();

        for key in AbilityKey::ALL {
            let base = character.base_scores().get(key);
            let expected = if character.boosts().contains(&key) {
                base + rules::BOOST_AMOUNT
            } else {
                base
            };
            assert_eq!(character.ability_scores().get(key), expected);
        }
        assert_eq!(character.ability_scores().intelligence, 15);
        assert_eq!(character.modifier(AbilityKey::Strength), 3);
        assert!(character.play_state().is_empty());
        assert_eq!(character.created_at(), created);
        assert_eq!(character.updated_at(), committed);
        assert_eq!(character.name().as_str(), "Ysolde the Grey");
    }

    #[test]
    fn invalid_draft_yields_review_report() {
        let (created, committed) = times();
        let mut draft = complete_wizard_draft(CharacterId::new(), created);
        draft.set_name("");
        let report = Character::from_draft(&draft, &Catalog::core(), committed).unwrap_err();
        assert!(!report.is_valid());
        assert!(report.unmet().any(|u| u.field == "name"));
    }

    #[test]
    fn serializes_round_trip_through_json() {
        let (created, committed) = times();
        let draft = complete_wizard_draft(CharacterId::new(), created);
        let character = Character::from_draft(&draft, &Catalog::core(), committed).unwrap();

        let json = serde_json::to_value(&character).unwrap();
        assert_eq!(json["kinId"], "human");
        assert_eq!(json["abilityScores"]["int"], 15);

        let back: Character = serde_json::from_value(json).unwrap();
        assert_eq!(back, character);
    }

    #[test]
    fn quick_to_fight_hook_is_active() {
        let (created, committed) = times();
        let catalog = Catalog::core();
        let draft = complete_wizard_draft(CharacterId::new(), created);
        let character = Character::from_draft(&draft, &catalog, committed).unwrap();
        assert!(character
            .rules_hooks(&catalog)
            .contains(&RulesHook::InitiativeBestOfTwo));
        assert_eq!(character.feat_slots(&catalog).adventurer, 1);
    }

    #[test]
    fn quick_to_fight_rolls_twice_and_guards_the_first_round() {
        let (created, committed) = times();
        let catalog = Catalog::core();
        let draft = complete_wizard_draft(CharacterId::new(), created);
        let character = Character::from_draft(&draft, &catalog, committed).unwrap();

        let roll = character.initiative(&catalog, 8, Some(15));
        assert_eq!(roll.result, 15);
        assert!(roll.used_best_of_two);

        assert_eq!(character.first_round_defense_bonus(&catalog, 15, &[10, 14]), 2);
        assert_eq!(character.first_round_defense_bonus(&catalog, 15, &[15]), 0);
    }

    #[test]
    fn other_kin_powers_roll_once_without_bonus() {
        let (created, committed) = times();
        let catalog = Catalog::core();
        let mut draft = complete_wizard_draft(CharacterId::new(), created);
        draft.toggle_kin_power("human-quick-to-fight", &catalog);
        draft.toggle_kin_power("human-resourceful", &catalog);
        let character = Character::from_draft(&draft, &catalog, committed).unwrap();

        let roll = character.initiative(&catalog, 8, Some(15));
        assert_eq!(roll.result, 8);
        assert!(!roll.used_best_of_two);
        assert_eq!(character.first_round_defense_bonus(&catalog, 20, &[1]), 0);
    }
}
