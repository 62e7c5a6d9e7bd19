//! Tier gating by level.

use std::collections::BTreeSet;

use crate::entities::FeatTier;
use crate::value_objects::Level;

/// First level at which champion feats unlock.
pub const CHAMPION_LEVEL: u8 = 5;
/// First level at which epic feats unlock.
pub const EPIC_LEVEL: u8 = 8;

/// Tiers whose feats a character of this level may take.
pub fn allowed_tiers(level: Level) -> BTreeSet<FeatTier> {
    FeatTier::ALL
        .into_iter()
        .filter(|tier| *tier <= highest_tier(level))
        .collect()
}

/// The highest tier unlocked at this level.
pub fn highest_tier(level: Level) -> FeatTier {
    match level.value() {
        v if v >= EPIC_LEVEL => FeatTier::Epic,
        v if v >= CHAMPION_LEVEL => FeatTier::Champion,
        _ => FeatTier::Adventurer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use FeatTier::{Adventurer, Champion, Epic};

    fn lvl(v: u8) -> Level {
        Level::new(v).unwrap()
    }

    #[test]
    fn tiers_unlock_at_five_and_eight() {
        assert_eq!(allowed_tiers(lvl(4)), BTreeSet::from([Adventurer]));
        assert_eq!(allowed_tiers(lvl(5)), BTreeSet::from([Adventurer, Champion]));
        assert_eq!(allowed_tiers(lvl(7)), BTreeSet::from([Adventurer, Champion]));
        assert_eq!(
            allowed_tiers(lvl(8)),
            BTreeSet::from([Adventurer, Champion, Epic])
        );
    }

    #[test]
    fn highest_tier_is_max_of_allowed() {
        for level in Level::all() {
            let allowed = allowed_tiers(level);
            assert_eq!(allowed.iter().max().copied(), Some(highest_tier(level)));
        }
    }
}
