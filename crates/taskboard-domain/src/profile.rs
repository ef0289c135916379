use serde::{Deserialize, Serialize};

use crate::session::UserId;

/// A row of the `profiles` table. Written once at signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl Profile {
    pub fn new(id: UserId, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: Some(full_name.into()),
        }
    }

    /// Up to two upper-cased initials, e.g. "Asha Rao" -> "AR".
    pub fn initials(&self) -> Option<String> {
        let name = self.full_name.as_deref()?.trim();
        if name.is_empty() {
            return None;
        }
        Some(
            name.split_whitespace()
                .filter_map(|word| word.chars().next())
                .take(2)
                .flat_map(char::to_uppercase)
                .collect(),
        )
    }

    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or("")
    }
}
