//! Branch naming rules and limits.
//!
//! Branch names are Git-style identifiers: letters, digits, hyphens and
//! underscores only. Every recipe carries exactly one default branch,
//! seeded as `main` at creation and fork time.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Name of the branch seeded for every new or forked recipe.
pub const DEFAULT_BRANCH: &str = "main";

/// Maximum allowed length for a branch name.
pub const MAX_BRANCH_NAME_LENGTH: usize = 100;

/// Maximum allowed length for a branch description.
pub const MAX_BRANCH_DESCRIPTION_LENGTH: usize = 1000;

fn branch_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid branch name pattern"))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a branch name: non-empty, within [`MAX_BRANCH_NAME_LENGTH`],
/// and limited to letters, digits, hyphens and underscores.
pub fn validate_branch_name(name: &str) -> Result<(), CoreError> {
    if name.is_empty() {
        return Err(CoreError::Validation(
            "Branch name is required".to_string(),
        ));
    }
    if name.len() > MAX_BRANCH_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Branch name must not exceed {MAX_BRANCH_NAME_LENGTH} characters, got {}",
            name.len()
        )));
    }
    if !branch_name_pattern().is_match(name) {
        return Err(CoreError::Validation(
            "Branch name can only contain letters, numbers, hyphens and underscores"
                .to_string(),
        ));
    }
    Ok(())
}

/// Validate a branch description against [`MAX_BRANCH_DESCRIPTION_LENGTH`].
pub fn validate_branch_description(description: &str) -> Result<(), CoreError> {
    if description.len() > MAX_BRANCH_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Branch description must not exceed {MAX_BRANCH_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_branch_names() {
        assert!(validate_branch_name("main").is_ok());
        assert!(validate_branch_name("gluten-free").is_ok());
        assert!(validate_branch_name("vegan_v2").is_ok());
        assert!(validate_branch_name("V2").is_ok());
    }

    #[test]
    fn rejects_empty_name() {
        assert!(validate_branch_name("").is_err());
    }

    #[test]
    fn rejects_whitespace_and_punctuation() {
        assert!(validate_branch_name("my branch").is_err());
        assert!(validate_branch_name("feature/spicy").is_err());
        assert!(validate_branch_name("naïve").is_err());
    }

    #[test]
    fn rejects_name_exceeding_max() {
        let name = "a".repeat(MAX_BRANCH_NAME_LENGTH + 1);
        assert!(validate_branch_name(&name).is_err());
    }

    #[test]
    fn name_at_max_length_is_valid() {
        let name = "a".repeat(MAX_BRANCH_NAME_LENGTH);
        assert!(validate_branch_name(&name).is_ok());
    }

    #[test]
    fn description_bounds() {
        assert!(validate_branch_description("").is_ok());
        let long = "d".repeat(MAX_BRANCH_DESCRIPTION_LENGTH + 1);
        assert!(validate_branch_description(&long).is_err());
    }
}
