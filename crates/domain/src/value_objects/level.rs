//! Character level value object (1-10).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// A validated character level in `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Create a new validated level.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the value is outside `1..=10`.
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::validation(format!(
                "Level must be between {} and {} (got {})",
                Self::MIN,
                Self::MAX,
                value
            )))
        }
    }

    /// The first level.
    pub fn first() -> Self {
        Self(Self::MIN)
    }

    /// All levels in ascending order.
    pub fn all() -> impl Iterator<Item = Level> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::first()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Level {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        level.0
    }
}
