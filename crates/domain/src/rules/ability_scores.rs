//! Ability score assignment and boosts.
//!
//! A character distributes the default array across the six abilities (each
//! value used exactly once), then adds +2 to exactly two different abilities.

use std::collections::BTreeMap;
use std::fmt;

use crate::value_objects::{AbilityKey, AbilityScores};

/// The fixed array every character assigns from.
pub const DEFAULT_ARRAY: [i32; 6] = [17, 15, 14, 13, 12, 10];

/// Number of abilities that receive a boost.
pub const REQUIRED_BOOSTS: usize = 2;

/// Amount added to each boosted ability.
pub const BOOST_AMOUNT: i32 = 2;

/// Contract violations of [`apply_boosts`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AbilityScoreError {
    #[error("Exactly 2 boosts are required, got {count}")]
    InvalidBoostCount { count: usize },

    #[error("Both boosts target {0}; boosts must go to two different abilities")]
    DuplicateBoostTarget(AbilityKey),
}

/// Add the boost to each of the two named abilities.
///
/// Returns a new block; `base` is untouched.
///
/// # Errors
///
/// - [`AbilityScoreError::InvalidBoostCount`] unless exactly two keys are given
/// - [`AbilityScoreError::DuplicateBoostTarget`] if both keys are the same
pub fn apply_boosts(
    base: &AbilityScores,
    boosted: &[AbilityKey],
) -> Result<AbilityScores, AbilityScoreError> {
    let [first, second] = boosted else {
        return Err(AbilityScoreError::InvalidBoostCount {
            count: boosted.len(),
        });
    };
    if first == second {
        return Err(AbilityScoreError::DuplicateBoostTarget(*first));
    }

    let mut scores = *base;
    for key in [*first, *second] {
        scores.set(key, base.get(key) + BOOST_AMOUNT);
    }
    Ok(scores)
}

/// Why a base assignment is not a permutation of the default array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentProblem {
    Unassigned(AbilityKey),
    NotInArray { key: AbilityKey, value: i32 },
    /// The value is assigned to more than one ability
    Reused { value: i32, keys: Vec<AbilityKey> },
}

impl fmt::Display for AssignmentProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentProblem::Unassigned(key) => {
                write!(f, "{} has no score assigned", key.display_name())
            }
            AssignmentProblem::NotInArray { key, value } => write!(
                f,
                "{} is {}, which is not in the array {:?}",
                key.display_name(),
                value,
                DEFAULT_ARRAY
            ),
            AssignmentProblem::Reused { value, keys } => {
                let names: Vec<_> = keys.iter().map(|k| k.display_name()).collect();
                write!(f, "{} is used more than once ({})", value, names.join(", "))
            }
        }
    }
}

/// Check that every ability has a value and the values are exactly the
/// default array, each used once.
///
/// On success returns the assignment as a full score block.
pub fn check_assignment(
    assignment: &BTreeMap<AbilityKey, i32>,
) -> Result<AbilityScores, Vec<AssignmentProblem>> {
    let mut problems = Vec::new();
    let mut by_value: BTreeMap<i32, Vec<AbilityKey>> = BTreeMap::new();

    for key in AbilityKey::ALL {
        match assignment.get(&key) {
            None => problems.push(AssignmentProblem::Unassigned(key)),
            Some(&value) if !DEFAULT_ARRAY.contains(&value) => {
                problems.push(AssignmentProblem::NotInArray { key, value })
            }
            Some(&value) => by_value.entry(value).or_default().push(key),
        }
    }

    for (value, keys) in by_value {
        if keys.len() > 1 {
            problems.push(AssignmentProblem::Reused { value, keys });
        }
    }

    if problems.is_empty() {
        Ok(AbilityScores::from_fn(|key| {
            assignment.get(&key).copied().unwrap_or_default()
        }))
    } else {
        Err(problems)
    }
}

/// Assign the default array in sheet order (str 17, dex 15, ...).
pub fn default_assignment() -> BTreeMap<AbilityKey, i32> {
    AbilityKey::ALL.into_iter().zip(DEFAULT_ARRAY).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permutations(items: &[i32]) -> Vec<Vec<i32>> {
        if items.len() <= 1 {
            return vec![items.to_vec()];
        }
        let mut out = Vec::new();
        for i in 0..items.len() {
            let mut rest = items.to_vec();
            let head = rest.remove(i);
            for mut tail in permutations(&rest) {
                tail.insert(0, head);
                out.push(tail);
            }
        }
        out
    }

    fn key_pairs() -> Vec<[AbilityKey; 2]> {
        let mut pairs = Vec::new();
        for (i, a) in AbilityKey::ALL.into_iter().enumerate() {
            for b in AbilityKey::ALL.into_iter().skip(i + 1) {
                pairs.push([a, b]);
            }
        }
        pairs
    }

    #[test]
    fn boosts_raise_exactly_two_scores_for_every_assignment() {
        let array_sum: i32 = DEFAULT_ARRAY.iter().sum();
        let perms = permutations(&DEFAULT_ARRAY);
        assert_eq!(perms.len(), 720);
        assert_eq!(key_pairs().len(), 15);

        for perm in &perms {
            let base = AbilityScores::from_fn(|key| {
                let idx = AbilityKey::ALL.iter().position(|k| *k == key).unwrap();
                perm[idx]
            });
            for pair in key_pairs() {
                let boosted = apply_boosts(&base, &pair).unwrap();
                let raised = AbilityKey::ALL
                    .into_iter()
                    .filter(|k| boosted.get(*k) == base.get(*k) + BOOST_AMOUNT)
                    .count();
                let unchanged = AbilityKey::ALL
                    .into_iter()
                    .filter(|k| boosted.get(*k) == base.get(*k))
                    .count();
                assert_eq!(raised, 2);
                assert_eq!(unchanged, 4);
                assert_eq!(boosted.total(), array_sum + 4);
            }
        }
    }

    #[test]
    fn wrong_boost_count_is_rejected() {
        let base = AbilityScores::default();
        for count in [0usize, 1, 3] {
            let keys: Vec<_> = AbilityKey::ALL.into_iter().take(count).collect();
            assert_eq!(
                apply_boosts(&base, &keys),
                Err(AbilityScoreError::InvalidBoostCount { count })
            );
        }
    }

    #[test]
    fn duplicate_boost_is_rejected() {
        let base = AbilityScores::default();
        assert_eq!(
            apply_boosts(&base, &[AbilityKey::Wisdom, AbilityKey::Wisdom]),
            Err(AbilityScoreError::DuplicateBoostTarget(AbilityKey::Wisdom))
        );
    }

    #[test]
    fn boosting_leaves_input_untouched() {
        let base = AbilityScores::default();
        let _ = apply_boosts(&base, &[AbilityKey::Strength, AbilityKey::Charisma]).unwrap();
        assert_eq!(base, AbilityScores::default());
    }

    #[test]
    fn default_assignment_passes() {
        let scores = check_assignment(&default_assignment()).unwrap();
        assert_eq!(scores.strength, 17);
        assert_eq!(scores.charisma, 10);
    }

    #[test]
    fn assignment_problems_are_reported() {
        let mut assignment = default_assignment();
        assignment.remove(&AbilityKey::Charisma);
        assignment.insert(AbilityKey::Wisdom, 17);
        assignment.insert(AbilityKey::Intelligence, 16);

        let problems = check_assignment(&assignment).unwrap_err();
        assert!(problems.contains(&AssignmentProblem::Unassigned(AbilityKey::Charisma)));
        assert!(problems.contains(&AssignmentProblem::NotInArray {
            key: AbilityKey::Intelligence,
            value: 16
        }));
        assert!(problems.contains(&AssignmentProblem::Reused {
            value: 17,
            keys: vec![AbilityKey::Strength, AbilityKey::Wisdom]
        }));
    }
}
