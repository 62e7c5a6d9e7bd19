//! Starting equipment chosen in the wizard.

use serde::{Deserialize, Serialize};

/// Gear carried by a character. Free text; the engine does not price or weigh items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    #[serde(default)]
    pub weapons: Vec<String>,
    #[serde(default)]
    pub armor: Option<String>,
    #[serde(default)]
    pub shield: Option<String>,
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub items: Vec<String>,
}

impl Equipment {
    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
            && self.armor.is_none()
            && self.shield.is_none()
            && self.implements.is_empty()
            && self.items.is_empty()
    }
}
