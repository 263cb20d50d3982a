//! Fork limits and helpers.

use crate::error::CoreError;
use crate::types::DbId;

/// Hard cap on fork-tree traversal depth.
///
/// The schema makes cycles impossible, but traversal must still
/// terminate on corrupted data.
pub const MAX_FORK_TREE_DEPTH: i32 = 25;

/// Maximum allowed length for a fork reason.
pub const MAX_FORK_REASON_LENGTH: usize = 500;

/// Validate a fork reason against [`MAX_FORK_REASON_LENGTH`]. Empty
/// reasons are allowed.
pub fn validate_fork_reason(reason: &str) -> Result<(), CoreError> {
    if reason.len() > MAX_FORK_REASON_LENGTH {
        return Err(CoreError::Validation(format!(
            "Fork reason must not exceed {MAX_FORK_REASON_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Commit message for version 1 of a forked recipe.
pub fn initial_fork_message(original_recipe_id: DbId) -> String {
    format!("Initial fork from recipe #{original_recipe_id}")
}
