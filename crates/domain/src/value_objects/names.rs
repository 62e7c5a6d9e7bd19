//! Validated name newtypes
//!
//! Names are valid by construction:
//! - Non-empty after trimming
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for a character name
pub const MAX_NAME_LENGTH: usize = 200;

// ============================================================================
// CharacterName
// ============================================================================

/// A validated character name (non-empty, <=200 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CharacterName(String);

impl CharacterName {
    /// Create a new validated character name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds 200 characters after trimming
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Character name cannot be empty"));
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Character name cannot exceed {} characters",
                MAX_NAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CharacterName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CharacterName> for String {
    fn from(name: CharacterName) -> String {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        let name = CharacterName::new("  Fangril Pentarion \t").unwrap();
        assert_eq!(name.as_str(), "Fangril Pentarion");
    }

    #[test]
    fn rejects_blank_names() {
        assert!(CharacterName::new("").is_err());
        assert!(CharacterName::new("   ").is_err());
    }

    #[test]
    fn rejects_overlong_names() {
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(CharacterName::new(long).is_err());
        assert!(CharacterName::new("x".repeat(MAX_NAME_LENGTH)).is_ok());
    }

    #[test]
    fn deserialization_validates() {
        let ok: Result<CharacterName, _> = serde_json::from_str("\"Ysolde\"");
        assert!(ok.is_ok());
        let blank: Result<CharacterName, _> = serde_json::from_str("\"  \"");
        assert!(blank.is_err());
    }
}
