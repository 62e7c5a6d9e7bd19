//! Play-state placeholders carried by a committed character.
//!
//! None of these are computed by the wizard; a freshly committed character
//! starts with empty play state and the table fills it in later.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Defenses {
    pub ac: i32,
    pub pd: i32,
    pub md: i32,
    pub initiative: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitPoints {
    pub current: i32,
    pub max: i32,
    pub recoveries: u8,
    #[serde(default)]
    pub recovery_die: Option<String>,
}

/// Usage tracking for one limited-use power or feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageState {
    pub spent: bool,
    #[serde(default)]
    pub recharge_needed: bool,
    #[serde(default)]
    pub last_reset: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayState {
    #[serde(default)]
    pub defenses: Option<Defenses>,
    #[serde(default)]
    pub hp: Option<HitPoints>,
    /// Keyed by feature or kin power id
    #[serde(default)]
    pub usage: BTreeMap<String, UsageState>,
}

impl PlayState {
    pub fn is_empty(&self) -> bool {
        self.defenses.is_none() && self.hp.is_none() && self.usage.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert!(PlayState::default().is_empty());
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let state: PlayState = serde_json::from_str(r#"{"usage": {}}"#).unwrap();
        assert!(state.is_empty());
    }
}
