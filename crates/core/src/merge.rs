//! Merge request lifecycle.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// State of a merge request.
///
/// `Open` is the only non-terminal state; every transition leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeRequestState {
    Open,
    Merged,
    Closed,
    Rejected,
}

impl MergeRequestState {
    /// String representation for display, logging, and database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Merged => "merged",
            Self::Closed => "closed",
            Self::Rejected => "rejected",
        }
    }

    /// Parse the storage representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(Self::Open),
            "merged" => Some(Self::Merged),
            "closed" => Some(Self::Closed),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Open)
    }
}

impl std::fmt::Display for MergeRequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check a state transition. Only `open -> merged | closed | rejected`
/// is allowed.
pub fn validate_transition(
    from: MergeRequestState,
    to: MergeRequestState,
) -> Result<(), CoreError> {
    if from != MergeRequestState::Open {
        return Err(CoreError::Conflict(format!(
            "Merge request is already {from}"
        )));
    }
    if to == MergeRequestState::Open {
        return Err(CoreError::Validation(
            "Merge request cannot transition back to open".to_string(),
        ));
    }
    Ok(())
}
