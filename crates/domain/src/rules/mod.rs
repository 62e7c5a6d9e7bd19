//! Pure rules - ability scores, feat slots, tier gating and initiative
//!
//! Everything here is a side-effect-free function over values. Kin power
//! [`RulesHook`]s are interpreted only in this module.

pub mod ability_scores;
pub mod feat_slots;
pub mod initiative;
pub mod tiers;

use std::collections::BTreeSet;

pub use ability_scores::{
    apply_boosts, check_assignment, default_assignment, AbilityScoreError, AssignmentProblem,
    BOOST_AMOUNT, DEFAULT_ARRAY, REQUIRED_BOOSTS,
};
pub use feat_slots::{base_feat_slots, feat_slots, FeatSlots};
pub use initiative::{first_round_defense_bonus, resolve_initiative, InitiativeRoll};
pub use tiers::{allowed_tiers, highest_tier};

use crate::catalog::Catalog;
use crate::entities::RulesHook;

/// Hooks carried by the chosen kin powers. Unknown power ids are skipped.
pub fn active_hooks<'a>(
    catalog: &Catalog,
    kin_power_ids: impl IntoIterator<Item = &'a String>,
) -> BTreeSet<RulesHook> {
    kin_power_ids
        .into_iter()
        .filter_map(|id| catalog.kin_power(id))
        .filter_map(|(_, power)| power.rules_hook)
        .collect()
}
