//! Tiered feats.
//!
//! A feat belongs to one of three tiers that unlock with level. Class-owned
//! feats are only offered to their class; generic feats (no `class_id`) are
//! offered to everyone. A feat carrying `requires_feature_id` is only
//! selectable once that feature has been picked.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Power band of a feat. Ordered: adventurer < champion < epic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatTier {
    #[serde(alias = "Adventurer")]
    Adventurer,
    #[serde(alias = "Champion")]
    Champion,
    #[serde(alias = "Epic")]
    Epic,
}

impl FeatTier {
    pub const ALL: [FeatTier; 3] = [FeatTier::Adventurer, FeatTier::Champion, FeatTier::Epic];

    pub fn display_name(self) -> &'static str {
        match self {
            FeatTier::Adventurer => "Adventurer",
            FeatTier::Champion => "Champion",
            FeatTier::Epic => "Epic",
        }
    }
}

impl fmt::Display for FeatTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A feat definition from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatDef {
    pub id: String,
    /// Owning class; `None` for generic feats
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
    pub tier: FeatTier,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Feature that must be among the chosen picks before this feat is offered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_feature_id: Option<String>,
}

impl FeatDef {
    /// Create a generic feat with no class owner or prerequisite.
    pub fn new(id: impl Into<String>, tier: FeatTier, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            class_id: None,
            tier,
            name: name.into(),
            description: None,
            requires_feature_id: None,
        }
    }

    pub fn for_class(mut self, class_id: impl Into<String>) -> Self {
        self.class_id = Some(class_id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn requires_feature(mut self, feature_id: impl Into<String>) -> Self {
        self.requires_feature_id = Some(feature_id.into());
        self
    }

    pub fn is_generic(&self) -> bool {
        self.class_id.is_none()
    }

    /// Whether this feat is available to the given class (its own or generic).
    pub fn is_available_to(&self, class_id: Option<&str>) -> bool {
        self.is_generic() || self.class_id.as_deref() == class_id
    }
}
