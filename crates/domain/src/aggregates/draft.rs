//! Draft aggregate - a character under construction
//!
//! A draft holds raw, possibly invalid input. Nothing here refuses to store
//! a bad name or an out-of-range level; the step validators report those.
//! Choices drawn from the catalog (kin powers, picks, feats, boosts) are
//! guarded by toggles that ignore selections the rules would not offer.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use crate::catalog::Catalog;
use crate::entities::{FeatDef, FeatureKind, RulesHook};
use crate::events::{ChoiceChange, SelectionBlock, SelectionChange};
use crate::ids::CharacterId;
use crate::rules::{self, FeatSlots, REQUIRED_BOOSTS};
use crate::value_objects::{AbilityKey, Equipment, FeaturePicks, Level};

/// Wizard draft state: either nothing started or a character in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Draft {
    #[default]
    Empty,
    InProgress(Box<DraftCharacter>),
}

impl Draft {
    pub fn is_empty(&self) -> bool {
        matches!(self, Draft::Empty)
    }

    pub fn as_character(&self) -> Option<&DraftCharacter> {
        match self {
            Draft::Empty => None,
            Draft::InProgress(draft) => Some(draft),
        }
    }

    pub fn as_character_mut(&mut self) -> Option<&mut DraftCharacter> {
        match self {
            Draft::Empty => None,
            Draft::InProgress(draft) => Some(draft),
        }
    }

    /// Clear the draft, returning what was there.
    pub fn take(&mut self) -> Option<DraftCharacter> {
        match std::mem::take(self) {
            Draft::Empty => None,
            Draft::InProgress(draft) => Some(*draft),
        }
    }
}

/// The fields of a character accumulated across wizard steps.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftCharacter {
    // Identity
    id: CharacterId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,

    // Basics (raw input)
    name: String,
    level: u8,
    notes: String,

    // Ability scores; a missing key is unassigned
    base_scores: BTreeMap<AbilityKey, i32>,
    boosts: Vec<AbilityKey>,

    // Kin
    kin_id: Option<String>,
    kin_power_ids: Vec<String>,

    // Class
    class_id: Option<String>,
    picks: FeaturePicks,
    feat_ids: Vec<String>,

    equipment: Equipment,
}

impl DraftCharacter {
    // =========================================================================
    // Constructor
    // =========================================================================

    pub fn new(id: CharacterId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at: now,
            updated_at: now,
            name: String::new(),
            level: Level::MIN,
            notes: String::new(),
            base_scores: BTreeMap::new(),
            boosts: Vec::new(),
            kin_id: None,
            kin_power_ids: Vec::new(),
            class_id: None,
            picks: FeaturePicks::default(),
            feat_ids: Vec::new(),
            equipment: Equipment::default(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn base_scores(&self) -> &BTreeMap<AbilityKey, i32> {
        &self.base_scores
    }

    pub fn boosts(&self) -> &[AbilityKey] {
        &self.boosts
    }

    pub fn kin_id(&self) -> Option<&str> {
        self.kin_id.as_deref()
    }

    pub fn kin_power_ids(&self) -> &[String] {
        &self.kin_power_ids
    }

    pub fn class_id(&self) -> Option<&str> {
        self.class_id.as_deref()
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
    // Derived queries
    // =========================================================================

    /// Rules hooks granted by the chosen kin powers.
    pub fn rules_hooks(&self, catalog: &Catalog) -> BTreeSet<RulesHook> {
        rules::active_hooks(catalog, &self.kin_power_ids)
    }

    /// Feat slots per tier, or `None` while the level is invalid.
    pub fn feat_capacity(&self, catalog: &Catalog) -> Option<FeatSlots> {
        let level = Level::new(self.level).ok()?;
        Some(rules::feat_slots(level, &self.rules_hooks(catalog)))
    }

    /// Feats the character may choose right now: an unlocked tier, owned by
    /// the chosen class or generic, with any required feature already picked.
    pub fn offered_feats<'a>(&self, catalog: &'a Catalog) -> Vec<&'a FeatDef> {
        let Ok(level) = Level::new(self.level) else {
            return Vec::new();
        };
        let tiers = rules::allowed_tiers(level);
        catalog
            .feats_for(self.class_id.as_deref(), &tiers)
            .filter(|feat| self.prerequisite_met(feat))
            .collect()
    }

    /// Whether a feat's required feature is among the chosen picks.
    pub fn prerequisite_met(&self, feat: &FeatDef) -> bool {
        feat.requires_feature_id
            .as_deref()
            .map_or(true, |feature_id| self.picks.contains(feature_id))
    }

    // =========================================================================
    // Basics
    // =========================================================================

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_level(&mut self, level: u8) {
        self.level = level;
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    // =========================================================================
    // Ability scores
    // =========================================================================

    /// Assign (or with `None`, unassign) one base score.
    pub fn assign_score(&mut self, key: AbilityKey, value: Option<i32>) {
        match value {
            Some(value) => {
                self.base_scores.insert(key, value);
            }
            None => {
                self.base_scores.remove(&key);
            }
        }
    }

    pub fn set_base_scores(&mut self, scores: BTreeMap<AbilityKey, i32>) {
        self.base_scores = scores;
    }

    /// Toggle a +2 boost. Selecting a third boost is ignored.
    pub fn toggle_boost(&mut self, key: AbilityKey) -> SelectionChange {
        if let Some(pos) = self.boosts.iter().position(|k| *k == key) {
            self.boosts.remove(pos);
            return SelectionChange::Deselected;
        }
        if self.boosts.len() >= REQUIRED_BOOSTS {
            return SelectionChange::Ignored(SelectionBlock::CapacityReached);
        }
        self.boosts.push(key);
        SelectionChange::Selected
    }

    // =========================================================================
    // Kin
    // =========================================================================

    /// Choose a kin. Switching to a different kin clears the chosen powers,
    /// since a power of one kin means nothing for another.
    pub fn set_kin(&mut self, kin_id: impl Into<String>) -> ChoiceChange {
        let kin_id = kin_id.into();
        if self.kin_id.as_deref() == Some(kin_id.as_str()) {
            return ChoiceChange::Unchanged;
        }
        let cleared = self.kin_power_ids.len();
        self.kin_power_ids.clear();
        ChoiceChange::Changed {
            previous: self.kin_id.replace(kin_id),
            cleared,
        }
    }

    pub fn toggle_kin_power(&mut self, power_id: &str, catalog: &Catalog) -> SelectionChange {
        if remove_id(&mut self.kin_power_ids, power_id) {
            return SelectionChange::Deselected;
        }
        let Some(kin) = self.kin_id.as_deref().and_then(|id| catalog.kin(id)) else {
            return SelectionChange::Ignored(SelectionBlock::NoKin);
        };
        if kin.power(power_id).is_none() {
            return SelectionChange::Ignored(SelectionBlock::NotOffered);
        }
        if self.kin_power_ids.len() >= usize::from(kin.required_picks) {
            return SelectionChange::Ignored(SelectionBlock::CapacityReached);
        }
        self.kin_power_ids.push(power_id.to_string());
        SelectionChange::Selected
    }

    // =========================================================================
    // Class, picks and feats
    // =========================================================================

    /// Choose a class. Picks and feats are kept; the review gate catches any
    /// that no longer fit.
    pub fn set_class(&mut self, class_id: impl Into<String>) -> ChoiceChange {
        let class_id = class_id.into();
        if self.class_id.as_deref() == Some(class_id.as_str()) {
            return ChoiceChange::Unchanged;
        }
        ChoiceChange::Changed {
            previous: self.class_id.replace(class_id),
            cleared: 0,
        }
    }

    pub fn toggle_pick(
        &mut self,
        kind: FeatureKind,
        feature_id: &str,
        catalog: &Catalog,
    ) -> SelectionChange {
        if remove_id(self.picks.bucket_mut(kind), feature_id) {
            return SelectionChange::Deselected;
        }
        let Some(class) = self.class_id.as_deref().and_then(|id| catalog.class(id)) else {
            return SelectionChange::Ignored(SelectionBlock::NoClass);
        };
        let offered = catalog
            .feature(feature_id)
            .is_some_and(|f| f.class_id == class.id && f.kind == kind);
        if !offered {
            return SelectionChange::Ignored(SelectionBlock::NotOffered);
        }
        let bucket = self.picks.bucket_mut(kind);
        if bucket.len() >= usize::from(class.picks.required(kind)) {
            return SelectionChange::Ignored(SelectionBlock::CapacityReached);
        }
        bucket.push(feature_id.to_string());
        SelectionChange::Selected
    }

    /// Toggle a feat. Deselecting always works; selecting is ignored unless
    /// the feat is offered and its tier has a free slot.
    pub fn toggle_feat(&mut self, feat_id: &str, catalog: &Catalog) -> SelectionChange {
        if remove_id(&mut self.feat_ids, feat_id) {
            return SelectionChange::Deselected;
        }
        let Some(feat) = self
            .offered_feats(catalog)
            .into_iter()
            .find(|f| f.id == feat_id)
        else {
            return SelectionChange::Ignored(SelectionBlock::NotOffered);
        };
        let capacity = self
            .feat_capacity(catalog)
            .map_or(0, |slots| usize::from(slots.get(feat.tier)));
        let used = self
            .feat_ids
            .iter()
            .filter_map(|id| catalog.feat(id))
            .filter(|f| f.tier == feat.tier)
            .count();
        if used >= capacity {
            return SelectionChange::Ignored(SelectionBlock::CapacityReached);
        }
        self.feat_ids.push(feat_id.to_string());
        SelectionChange::Selected
    }

    // =========================================================================
    // Equipment
    // =========================================================================

    pub fn set_equipment(&mut self, equipment: Equipment) {
        self.equipment = equipment;
    }

    pub fn equipment_mut(&mut self) -> &mut Equipment {
        &mut self.equipment
    }

    // =========================================================================
    // Timestamps
    // =========================================================================

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

fn remove_id(ids: &mut Vec<String>, id: &str) -> bool {
    match ids.iter().position(|existing| existing == id) {
        Some(pos) => {
            ids.remove(pos);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft() -> DraftCharacter {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        DraftCharacter::new(CharacterId::new(), now)
    }

    #[test]
    fn new_draft_has_defaults() {
        let d = draft();
        assert_eq!(d.level(), 1);
        assert!(d.name().is_empty());
        assert!(d.base_scores().is_empty());
        assert_eq!(d.created_at(), d.updated_at());
    }

    #[test]
    fn switching_kin_clears_powers() {
        let catalog = Catalog::core();
        let mut d = draft();
        d.set_kin("human");
        assert_eq!(
            d.toggle_kin_power("human-resourceful", &catalog),
            SelectionChange::Selected
        );

        let change = d.set_kin("dwarf");
        assert_eq!(
            change,
            ChoiceChange::Changed {
                previous: Some("human".into()),
                cleared: 1
            }
        );
        assert!(d.kin_power_ids().is_empty());
    }

    #[test]
    fn reselecting_same_kin_keeps_powers() {
        let catalog = Catalog::core();
        let mut d = draft();
        d.set_kin("human");
        d.toggle_kin_power("human-push-it", &catalog);
        assert_eq!(d.set_kin("human"), ChoiceChange::Unchanged);
        assert_eq!(d.kin_power_ids(), ["human-push-it".to_string()]);
    }

    #[test]
    fn kin_power_selection_respects_kin_and_capacity() {
        let catalog = Catalog::core();
        let mut d = draft();
        assert_eq!(
            d.toggle_kin_power("human-push-it", &catalog),
            SelectionChange::Ignored(SelectionBlock::NoKin)
        );

        d.set_kin("human");
        assert_eq!(
            d.toggle_kin_power("dwarf-stubborn", &catalog),
            SelectionChange::Ignored(SelectionBlock::NotOffered)
        );
        d.toggle_kin_power("human-push-it", &catalog);
        assert_eq!(
            d.toggle_kin_power("human-resourceful", &catalog),
            SelectionChange::Ignored(SelectionBlock::CapacityReached)
        );
        assert_eq!(
            d.toggle_kin_power("human-push-it", &catalog),
            SelectionChange::Deselected
        );
        assert!(d.kin_power_ids().is_empty());
    }

    #[test]
    fn picks_fill_only_to_class_requirement() {
        let catalog = Catalog::core();
        let mut d = draft();
        assert_eq!(
            d.toggle_pick(FeatureKind::Talent, "ftr-cleave", &catalog),
            SelectionChange::Ignored(SelectionBlock::NoClass)
        );

        d.set_class("fighter");
        for id in ["ftr-power-cleave", "ftr-defend"] {
            assert!(d.toggle_pick(FeatureKind::Maneuver, id, &catalog).changed());
        }
        assert_eq!(
            d.toggle_pick(FeatureKind::Maneuver, "ftr-brace-for-it", &catalog),
            SelectionChange::Ignored(SelectionBlock::CapacityReached)
        );
        assert_eq!(
            d.toggle_pick(FeatureKind::Talent, "wiz-book", &catalog),
            SelectionChange::Ignored(SelectionBlock::NotOffered)
        );
        assert_eq!(
            d.toggle_pick(FeatureKind::Talent, "ftr-power-cleave", &catalog),
            SelectionChange::Ignored(SelectionBlock::NotOffered)
        );
    }

    #[test]
    fn feat_needs_prerequisite_feature() {
        let catalog = Catalog::core();
        let mut d = draft();
        d.set_class("wizard");

        assert_eq!(
            d.toggle_feat("feat-wiz-bookish-a", &catalog),
            SelectionChange::Ignored(SelectionBlock::NotOffered)
        );
        assert!(d.feat_ids().is_empty());

        d.toggle_pick(FeatureKind::Talent, "wiz-book", &catalog);
        assert_eq!(
            d.toggle_feat("feat-wiz-bookish-a", &catalog),
            SelectionChange::Selected
        );
        assert_eq!(d.feat_ids(), ["feat-wiz-bookish-a".to_string()]);
    }

    #[test]
    fn offered_feats_follow_class_tier_and_prerequisites() {
        let catalog = Catalog::core();
        let mut d = draft();
        d.set_class("wizard");
        d.toggle_pick(FeatureKind::Talent, "wiz-book", &catalog);

        let offered: Vec<&str> = d.offered_feats(&catalog).iter().map(|f| f.id.as_str()).collect();
        assert!(offered.contains(&"feat-wiz-bookish-a"));
        assert!(offered.contains(&"feat-toughness"));
        assert!(!offered.contains(&"feat-wiz-evoker-a"));
        assert!(!offered.contains(&"feat-ftr-weapon-a"));
        assert!(!offered.contains(&"feat-strong-recovery"));
    }

    #[test]
    fn feat_capacity_is_per_tier() {
        let catalog = Catalog::core();
        let mut d = draft();
        d.set_class("wizard");
        d.toggle_pick(FeatureKind::Talent, "wiz-book", &catalog);
        d.toggle_pick(FeatureKind::Talent, "wiz-evoker", &catalog);

        // Level 1: one adventurer slot
        assert!(d.toggle_feat("feat-wiz-bookish-a", &catalog).changed());
        assert_eq!(
            d.toggle_feat("feat-wiz-evoker-a", &catalog),
            SelectionChange::Ignored(SelectionBlock::CapacityReached)
        );

        // Resourceful adds a slot at the highest tier
        d.set_kin("human");
        d.toggle_kin_power("human-resourceful", &catalog);
        assert!(d.toggle_feat("feat-wiz-evoker-a", &catalog).changed());
    }

    #[test]
    fn champion_feats_wait_for_level_five() {
        let catalog = Catalog::core();
        let mut d = draft();
        d.set_class("wizard");
        d.set_level(4);
        d.toggle_pick(FeatureKind::Spell, "wiz-fireball", &catalog);
        assert_eq!(
            d.toggle_feat("feat-wiz-fireball-c", &catalog),
            SelectionChange::Ignored(SelectionBlock::NotOffered)
        );
        d.set_level(5);
        assert_eq!(
            d.toggle_feat("feat-wiz-fireball-c", &catalog),
            SelectionChange::Selected
        );
    }

    #[test]
    fn third_boost_is_ignored() {
        let mut d = draft();
        d.toggle_boost(AbilityKey::Strength);
        d.toggle_boost(AbilityKey::Constitution);
        assert_eq!(
            d.toggle_boost(AbilityKey::Wisdom),
            SelectionChange::Ignored(SelectionBlock::CapacityReached)
        );
        assert_eq!(d.toggle_boost(AbilityKey::Strength), SelectionChange::Deselected);
        assert_eq!(d.boosts(), [AbilityKey::Constitution]);
    }

    #[test]
    fn draft_take_empties() {
        let mut state = Draft::InProgress(Box::new(draft()));
        assert!(state.take().is_some());
        assert!(state.is_empty());
        assert!(state.take().is_none());
    }
}
