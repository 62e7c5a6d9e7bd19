//! Test fixtures and common test helpers.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::committed_character;
//!
//! #[test]
//! fn test_roster_holds_wizard() {
//!     let character = committed_character(now());
//!     // ... test logic
//! }
//! ```

use chrono::{DateTime, Utc};
use uuid::Uuid;

use herosmith_domain::rules;
use herosmith_domain::{AbilityKey, Catalog, Character, CharacterId, DraftCharacter, FeatureKind};

/// Fill `draft` with a level-1 human wizard that passes every step.
pub fn fill_wizard(draft: &mut DraftCharacter, catalog: &Catalog) {
    draft.set_name("Ysolde the Grey");
    draft.set_level(1);
    draft.set_base_scores(rules::default_assignment());
    draft.toggle_boost(AbilityKey::Intelligence);
    draft.toggle_boost(AbilityKey::Constitution);
    draft.set_kin("human");
    draft.toggle_kin_power("human-quick-to-fight", catalog);
    draft.set_class("wizard");
    for id in ["wiz-book", "wiz-evoker", "wiz-cantrip-mastery"] {
        draft.toggle_pick(FeatureKind::Talent, id, catalog);
    }
    for id in ["wiz-magic-missile", "wiz-shield", "wiz-ray-of-frost"] {
        draft.toggle_pick(FeatureKind::Spell, id, catalog);
    }
    draft.toggle_feat("feat-wiz-bookish-a", catalog);
    draft.equipment_mut().implements.push("Staff".into());
}

/// A committed wizard with a fixed id.
///
/// # Panics
///
/// Panics if the fixture no longer passes review.
pub fn committed_character(now: DateTime<Utc>) -> Character {
    committed_character_with_id(CharacterId::from_uuid(Uuid::from_u128(7)), now)
}

pub fn committed_character_with_id(id: CharacterId, now: DateTime<Utc>) -> Character {
    let catalog = Catalog::core();
    let mut draft = DraftCharacter::new(id, now);
    fill_wizard(&mut draft, &catalog);
    match Character::from_draft(&draft, &catalog, now) {
        Ok(character) => character,
        Err(report) => panic!("fixture draft failed review: {}", report),
    }
}
