//! Ability keys and the six-stat score block.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// One of the six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbilityKey {
    #[serde(rename = "str")]
    Strength,
    #[serde(rename = "dex")]
    Dexterity,
    #[serde(rename = "con")]
    Constitution,
    #[serde(rename = "int")]
    Intelligence,
    #[serde(rename = "wis")]
    Wisdom,
    #[serde(rename = "cha")]
    Charisma,
}

impl AbilityKey {
    /// All six keys in sheet order.
    pub const ALL: [AbilityKey; 6] = [
        AbilityKey::Strength,
        AbilityKey::Dexterity,
        AbilityKey::Constitution,
        AbilityKey::Intelligence,
        AbilityKey::Wisdom,
        AbilityKey::Charisma,
    ];

    /// Short form used on sheets and in storage ("str", "dex", ...).
    pub fn abbreviation(self) -> &'static str {
        match self {
            AbilityKey::Strength => "str",
            AbilityKey::Dexterity => "dex",
            AbilityKey::Constitution => "con",
            AbilityKey::Intelligence => "int",
            AbilityKey::Wisdom => "wis",
            AbilityKey::Charisma => "cha",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AbilityKey::Strength => "Strength",
            AbilityKey::Dexterity => "Dexterity",
            AbilityKey::Constitution => "Constitution",
            AbilityKey::Intelligence => "Intelligence",
            AbilityKey::Wisdom => "Wisdom",
            AbilityKey::Charisma => "Charisma",
        }
    }
}

impl fmt::Display for AbilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl FromStr for AbilityKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "str" | "strength" => Ok(AbilityKey::Strength),
            "dex" | "dexterity" => Ok(AbilityKey::Dexterity),
            "con" | "constitution" => Ok(AbilityKey::Constitution),
            "int" | "intelligence" => Ok(AbilityKey::Intelligence),
            "wis" | "wisdom" => Ok(AbilityKey::Wisdom),
            "cha" | "charisma" => Ok(AbilityKey::Charisma),
            _ => Err(DomainError::parse(format!("Unknown ability: {}", s))),
        }
    }
}

/// Modifier for an ability score: `floor((score - 10) / 2)`.
pub fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// The six ability scores of a character.
///
/// The default block is all 10s (a blank sheet before any assignment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbilityScores {
    #[serde(rename = "str")]
    pub strength: i32,
    #[serde(rename = "dex")]
    pub dexterity: i32,
    #[serde(rename = "con")]
    pub constitution: i32,
    #[serde(rename = "int")]
    pub intelligence: i32,
    #[serde(rename = "wis")]
    pub wisdom: i32,
    #[serde(rename = "cha")]
    pub charisma: i32,
}

impl AbilityScores {
    /// Build a block from a per-key function.
    pub fn from_fn(mut f: impl FnMut(AbilityKey) -> i32) -> Self {
        Self {
            strength: f(AbilityKey::Strength),
            dexterity: f(AbilityKey::Dexterity),
            constitution: f(AbilityKey::Constitution),
            intelligence: f(AbilityKey::Intelligence),
            wisdom: f(AbilityKey::Wisdom),
            charisma: f(AbilityKey::Charisma),
        }
    }

    pub fn get(&self, key: AbilityKey) -> i32 {
        match key {
            AbilityKey::Strength => self.strength,
            AbilityKey::Dexterity => self.dexterity,
            AbilityKey::Constitution => self.constitution,
            AbilityKey::Intelligence => self.intelligence,
            AbilityKey::Wisdom => self.wisdom,
            AbilityKey::Charisma => self.charisma,
        }
    }

    pub fn set(&mut self, key: AbilityKey, value: i32) {
        let slot = match key {
            AbilityKey::Strength => &mut self.strength,
            AbilityKey::Dexterity => &mut self.dexterity,
            AbilityKey::Constitution => &mut self.constitution,
            AbilityKey::Intelligence => &mut self.intelligence,
            AbilityKey::Wisdom => &mut self.wisdom,
            AbilityKey::Charisma => &mut self.charisma,
        };
        *slot = value;
    }

    /// Iterate `(key, score)` pairs in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (AbilityKey, i32)> + '_ {
        AbilityKey::ALL.into_iter().map(move |k| (k, self.get(k)))
    }

    pub fn total(&self) -> i32 {
        self.iter().map(|(_, v)| v).sum()
    }

    pub fn modifier(&self, key: AbilityKey) -> i32 {
        ability_modifier(self.get(key))
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::from_fn(|_| 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_rounds_down() {
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(12), 1);
        assert_eq!(ability_modifier(17), 3);
        assert_eq!(ability_modifier(19), 4);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(7), -2);
    }

    #[test]
    fn get_and_set_cover_every_key() {
        let mut scores = AbilityScores::default();
        for (i, key) in AbilityKey::ALL.into_iter().enumerate() {
            scores.set(key, i as i32);
        }
        for (i, key) in AbilityKey::ALL.into_iter().enumerate() {
            assert_eq!(scores.get(key), i as i32);
        }
        assert_eq!(scores.total(), 15);
    }

    #[test]
    fn parses_short_and_long_names() {
        assert_eq!("STR".parse::<AbilityKey>().unwrap(), AbilityKey::Strength);
        assert_eq!("wisdom".parse::<AbilityKey>().unwrap(), AbilityKey::Wisdom);
        assert!("luck".parse::<AbilityKey>().is_err());
    }

    #[test]
    fn serializes_with_short_keys() {
        let json = serde_json::to_value(AbilityScores::default()).unwrap();
        assert_eq!(json["str"], 10);
        assert_eq!(json["cha"], 10);
        assert_eq!(serde_json::to_value(AbilityKey::Intelligence).unwrap(), "int");
    }
}
