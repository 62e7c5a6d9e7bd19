//! Feat slots per tier by level.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::tiers::highest_tier;
use crate::entities::{FeatTier, RulesHook};
use crate::value_objects::Level;

/// Number of feats a character may hold in each tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatSlots {
    pub adventurer: u8,
    pub champion: u8,
    pub epic: u8,
}

impl FeatSlots {
    pub fn get(&self, tier: FeatTier) -> u8 {
        match tier {
            FeatTier::Adventurer => self.adventurer,
            FeatTier::Champion => self.champion,
            FeatTier::Epic => self.epic,
        }
    }

    fn get_mut(&mut self, tier: FeatTier) -> &mut u8 {
        match tier {
            FeatTier::Adventurer => &mut self.adventurer,
            FeatTier::Champion => &mut self.champion,
            FeatTier::Epic => &mut self.epic,
        }
    }

    pub fn total(&self) -> usize {
        usize::from(self.adventurer) + usize::from(self.champion) + usize::from(self.epic)
    }
}

impl fmt::Display for FeatSlots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Adv / {} Champ / {} Epic",
            self.adventurer, self.champion, self.epic
        )
    }
}

/// Slots before any kin bonus.
///
/// Adventurer grows with level up to 4; champion opens at 5 and epic at 8,
/// each capped at 3.
pub fn base_feat_slots(level: Level) -> FeatSlots {
    let level = level.value();
    FeatSlots {
        adventurer: level.min(4),
        champion: level.saturating_sub(4).min(3),
        epic: level.saturating_sub(7).min(3),
    }
}

/// Slots after applying every active rules hook.
pub fn feat_slots(level: Level, hooks: &BTreeSet<RulesHook>) -> FeatSlots {
    let mut slots = base_feat_slots(level);
    for hook in hooks {
        match hook {
            RulesHook::BonusFeatSlotAtHighestTier => {
                *slots.get_mut(highest_tier(level)) += 1;
            }
            RulesHook::InitiativeBestOfTwo => {}
        }
    }
    slots
}
