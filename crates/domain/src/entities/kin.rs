//! Kin (ancestry) definitions and their powers.
//!
//! Kin powers are mostly display text. A power may carry a [`RulesHook`]
//! which the rules layer interprets; the catalog itself stays declarative.

use serde::{Deserialize, Serialize};

use super::feat::FeatTier;

/// How often a kin power may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KinPowerUsage {
    OncePerBattle,
    Passive,
}

/// Engine behavior attached to a kin power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RulesHook {
    /// +1 feat slot at the highest tier unlocked by the character's level
    BonusFeatSlotAtHighestTier,
    /// Roll initiative twice and keep the better result
    InitiativeBestOfTwo,
}

/// Tier-scoped feat text attached to a kin power.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KinFeatGrant {
    pub tier: FeatTier,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KinPower {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub usage: KinPowerUsage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miss_effect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crit_effect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub feats: Vec<KinFeatGrant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules_hook: Option<RulesHook>,
}

impl KinPower {
    pub fn new(id: impl Into<String>, name: impl Into<String>, usage: KinPowerUsage) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            summary: None,
            usage,
            trigger: None,
            effect: None,
            miss_effect: None,
            crit_effect: None,
            requirements: None,
            notes: None,
            feats: Vec::new(),
            rules_hook: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_trigger(mut self, trigger: impl Into<String>) -> Self {
        self.trigger = Some(trigger.into());
        self
    }

    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = Some(effect.into());
        self
    }

    pub fn with_feat(mut self, tier: FeatTier, description: impl Into<String>) -> Self {
        self.feats.push(KinFeatGrant {
            tier,
            description: description.into(),
        });
        self
    }

    pub fn with_rules_hook(mut self, hook: RulesHook) -> Self {
        self.rules_hook = Some(hook);
        self
    }

    /// Feat grants sorted by tier.
    pub fn feats_by_tier(&self) -> Vec<&KinFeatGrant> {
        let mut feats: Vec<_> = self.feats.iter().collect();
        feats.sort_by_key(|f| f.tier);
        feats
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KinDef {
    pub id: String,
    pub name: String,
    /// Number of powers a character of this kin must choose
    pub required_picks: u8,
    pub powers: Vec<KinPower>,
}

impl KinDef {
    pub fn new(id: impl Into<String>, name: impl Into<String>, required_picks: u8) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            required_picks,
            powers: Vec::new(),
        }
    }

    pub fn with_power(mut self, power: KinPower) -> Self {
        self.powers.push(power);
        self
    }

    pub fn power(&self, power_id: &str) -> Option<&KinPower> {
        self.powers.iter().find(|p| p.id == power_id)
    }
}
