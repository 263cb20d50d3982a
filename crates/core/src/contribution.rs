//! Contributor roles.
//!
//! A contributor row records how a user first touched a recipe; the
//! role is never downgraded by later commits.

use serde::{Deserialize, Serialize};

/// How a user contributed to a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionType {
    /// Created the recipe.
    Creator,
    /// Committed a content change.
    Editor,
    /// Forked the recipe (role on the fork, not the original).
    Forker,
    /// Added by the owner as a collaborator.
    Collaborator,
}

impl ContributionType {
    /// String representation for display, logging, and database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Creator => "creator",
            Self::Editor => "editor",
            Self::Forker => "forker",
            Self::Collaborator => "collaborator",
        }
    }
}

impl std::fmt::Display for ContributionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
