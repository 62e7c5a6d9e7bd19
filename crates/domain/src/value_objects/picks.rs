//! Chosen class features, bucketed by kind.

use serde::{Deserialize, Serialize};

use crate::entities::FeatureKind;

/// Feature ids chosen for each pick bucket, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturePicks {
    #[serde(default)]
    pub talents: Vec<String>,
    #[serde(default)]
    pub powers: Vec<String>,
    #[serde(default)]
    pub spells: Vec<String>,
    #[serde(default)]
    pub maneuvers: Vec<String>,
}

impl FeaturePicks {
    pub fn bucket(&self, kind: FeatureKind) -> &[String] {
        match kind {
            FeatureKind::Talent => &self.talents,
            FeatureKind::Power => &self.powers,
            FeatureKind::Spell => &self.spells,
            FeatureKind::Maneuver => &self.maneuvers,
        }
    }

    pub fn bucket_mut(&mut self, kind: FeatureKind) -> &mut Vec<String> {
        match kind {
            FeatureKind::Talent => &mut self.talents,
            FeatureKind::Power => &mut self.powers,
            FeatureKind::Spell => &mut self.spells,
            FeatureKind::Maneuver => &mut self.maneuvers,
        }
    }

    /// Every chosen feature id across all buckets.
    pub fn all_ids(&self) -> impl Iterator<Item = &str> {
        FeatureKind::ALL
            .into_iter()
            .flat_map(move |kind| self.bucket(kind).iter().map(String::as_str))
    }

    pub fn contains(&self, feature_id: &str) -> bool {
        self.all_ids().any(|id| id == feature_id)
    }

    pub fn total(&self) -> usize {
        FeatureKind::ALL
            .into_iter()
            .map(|kind| self.bucket(kind).len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_looks_across_buckets() {
        let mut picks = FeaturePicks::default();
        picks.bucket_mut(FeatureKind::Talent).push("wiz-book".into());
        picks.bucket_mut(FeatureKind::Spell).push("wiz-fireball".into());

        assert!(picks.contains("wiz-book"));
        assert!(picks.contains("wiz-fireball"));
        assert!(!picks.contains("wiz-evoker"));
        assert_eq!(picks.total(), 2);
    }
}
