//! Class features: talents, powers, spells and maneuvers.
//!
//! Features are the pool from which a class's picks are drawn, filtered by
//! owning class and kind.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which pick bucket a feature belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Talent,
    Power,
    Spell,
    Maneuver,
}

impl FeatureKind {
    pub const ALL: [FeatureKind; 4] = [
        FeatureKind::Talent,
        FeatureKind::Power,
        FeatureKind::Spell,
        FeatureKind::Maneuver,
    ];

    /// Name of the pick bucket this kind fills ("talents", "powers", ...).
    pub fn bucket_name(self) -> &'static str {
        match self {
            FeatureKind::Talent => "talents",
            FeatureKind::Power => "powers",
            FeatureKind::Spell => "spells",
            FeatureKind::Maneuver => "maneuvers",
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FeatureKind::Talent => "talent",
            FeatureKind::Power => "power",
            FeatureKind::Spell => "spell",
            FeatureKind::Maneuver => "maneuver",
        };
        write!(f, "{}", s)
    }
}

/// How often a feature can be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureUsage {
    #[serde(alias = "At-Will")]
    AtWill,
    #[serde(alias = "Battle")]
    Battle,
    #[serde(alias = "Encounter")]
    Encounter,
    #[serde(alias = "Daily")]
    Daily,
    #[serde(alias = "Arc")]
    Arc,
    #[serde(alias = "Recharge")]
    Recharge,
    #[serde(alias = "Passive")]
    Passive,
}

/// A talent, power, spell or maneuver owned by a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureDef {
    pub id: String,
    pub class_id: String,
    pub kind: FeatureKind,
    pub name: String,
    pub usage: FeatureUsage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FeatureDef {
    pub fn new(
        id: impl Into<String>,
        class_id: impl Into<String>,
        kind: FeatureKind,
        name: impl Into<String>,
        usage: FeatureUsage,
    ) -> Self {
        Self {
            id: id.into(),
            class_id: class_id.into(),
            kind,
            name: name.into(),
            usage,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
