//! Character classes and their pick requirements.

use serde::{Deserialize, Serialize};

use super::feature::FeatureKind;

/// How many features of each kind a class must pick. Absent counts are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassPicks {
    #[serde(default)]
    pub talents: u8,
    #[serde(default)]
    pub powers: u8,
    #[serde(default)]
    pub spells: u8,
    #[serde(default)]
    pub maneuvers: u8,
}

impl ClassPicks {
    pub fn required(&self, kind: FeatureKind) -> u8 {
        match kind {
            FeatureKind::Talent => self.talents,
            FeatureKind::Power => self.powers,
            FeatureKind::Spell => self.spells,
            FeatureKind::Maneuver => self.maneuvers,
        }
    }

    /// Kinds with a non-zero requirement, in bucket order.
    pub fn required_kinds(&self) -> impl Iterator<Item = FeatureKind> + '_ {
        FeatureKind::ALL
            .into_iter()
            .filter(move |kind| self.required(*kind) > 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDef {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blurb: Option<String>,
    #[serde(default)]
    pub picks: ClassPicks,
}

impl ClassDef {
    pub fn new(id: impl Into<String>, name: impl Into<String>, picks: ClassPicks) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            blurb: None,
            picks,
        }
    }

    pub fn with_blurb(mut self, blurb: impl Into<String>) -> Self {
        self.blurb = Some(blurb.into());
        self
    }
}
