//! Initiative helpers for the best-of-two kin power.
//!
//! Rolls are supplied by the caller with every modifier already applied; the
//! engine does not roll dice.

use std::collections::BTreeSet;

use crate::entities::RulesHook;

/// Defense bonus for the first round when the adventurer feat applies.
pub const FIRST_ROUND_DEFENSE_BONUS: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitiativeRoll {
    /// The initiative actually used
    pub result: i32,
    pub first: i32,
    pub second: Option<i32>,
    pub used_best_of_two: bool,
}

/// Resolve initiative, keeping the better of two rolls when the hook is active.
///
/// With the hook but no second roll, the first roll counts twice.
pub fn resolve_initiative(
    hooks: &BTreeSet<RulesHook>,
    first: i32,
    second: Option<i32>,
) -> InitiativeRoll {
    if !hooks.contains(&RulesHook::InitiativeBestOfTwo) {
        return InitiativeRoll {
            result: first,
            first,
            second: None,
            used_best_of_two: false,
        };
    }
    let second = second.unwrap_or(first);
    InitiativeRoll {
        result: first.max(second),
        first,
        second: Some(second),
        used_best_of_two: true,
    }
}

/// Round-one defense bonus: +2 with the best-of-two hook and its adventurer
/// feat, when our initiative is strictly higher than every enemy's.
pub fn first_round_defense_bonus(
    hooks: &BTreeSet<RulesHook>,
    has_adventurer_feat: bool,
    initiative: i32,
    enemy_initiatives: &[i32],
) -> i32 {
    if !hooks.contains(&RulesHook::InitiativeBestOfTwo) || !has_adventurer_feat {
        return 0;
    }
    if enemy_initiatives.iter().all(|enemy| initiative > *enemy) {
        FIRST_ROUND_DEFENSE_BONUS
    } else {
        0
    }
}
