//! Recipe content limits and validation.
//!
//! All content fields are validated at the edge before any write path
//! runs; the limits mirror what the database schema will accept.

use crate::error::CoreError;
use crate::snapshot::{Ingredient, RecipeSnapshot};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum allowed length for a recipe title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum allowed length for the category field.
pub const MAX_CATEGORY_LENGTH: usize = 100;

/// Maximum allowed length for the tags field.
pub const MAX_TAGS_LENGTH: usize = 500;

/// Maximum allowed length for the steps text.
pub const MAX_STEPS_LENGTH: usize = 5000;

/// Servings bounds (inclusive).
pub const MIN_SERVINGS: i32 = 1;
pub const MAX_SERVINGS: i32 = 100;

/// Maximum number of ingredient lines per recipe.
pub const MAX_INGREDIENTS: usize = 50;

/// Maximum allowed length for a single ingredient name.
pub const MAX_INGREDIENT_NAME_LENGTH: usize = 200;

/// Maximum allowed length for a commit message.
pub const MAX_COMMIT_MESSAGE_LENGTH: usize = 500;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a recipe title: non-empty after trimming and within
/// [`MAX_TITLE_LENGTH`].
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title is required".to_string()));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title must not exceed {MAX_TITLE_LENGTH} characters, got {}",
            title.len()
        )));
    }
    Ok(())
}

/// Validate the servings count is within [`MIN_SERVINGS`]..=[`MAX_SERVINGS`].
pub fn validate_servings(servings: i32) -> Result<(), CoreError> {
    if !(MIN_SERVINGS..=MAX_SERVINGS).contains(&servings) {
        return Err(CoreError::Validation(format!(
            "Servings must be between {MIN_SERVINGS} and {MAX_SERVINGS}, got {servings}"
        )));
    }
    Ok(())
}

/// Validate the ingredient list: at most [`MAX_INGREDIENTS`] lines, each
/// with a non-empty name within [`MAX_INGREDIENT_NAME_LENGTH`].
pub fn validate_ingredients(ingredients: &[Ingredient]) -> Result<(), CoreError> {
    if ingredients.len() > MAX_INGREDIENTS {
        return Err(CoreError::Validation(format!(
            "Recipe must not have more than {MAX_INGREDIENTS} ingredients, got {}",
            ingredients.len()
        )));
    }
    for ingredient in ingredients {
        if ingredient.name.trim().is_empty() {
            return Err(CoreError::Validation(
                "Ingredient name must not be empty".to_string(),
            ));
        }
        if ingredient.name.len() > MAX_INGREDIENT_NAME_LENGTH {
            return Err(CoreError::Validation(format!(
                "Ingredient name must not exceed {MAX_INGREDIENT_NAME_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

/// Validate a commit message: non-empty after trimming and within
/// [`MAX_COMMIT_MESSAGE_LENGTH`].
pub fn validate_commit_message(message: &str) -> Result<(), CoreError> {
    if message.trim().is_empty() {
        return Err(CoreError::Validation(
            "Commit message is required".to_string(),
        ));
    }
    if message.len() > MAX_COMMIT_MESSAGE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Commit message must not exceed {MAX_COMMIT_MESSAGE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a full snapshot's content fields in one pass.
pub fn validate_content(snapshot: &RecipeSnapshot) -> Result<(), CoreError> {
    validate_title(&snapshot.title)?;
    validate_servings(snapshot.servings)?;
    validate_ingredients(&snapshot.ingredients)?;

    if snapshot.category.len() > MAX_CATEGORY_LENGTH {
        return Err(CoreError::Validation(format!(
            "Category must not exceed {MAX_CATEGORY_LENGTH} characters"
        )));
    }
    if snapshot.tags.len() > MAX_TAGS_LENGTH {
        return Err(CoreError::Validation(format!(
            "Tags must not exceed {MAX_TAGS_LENGTH} characters"
        )));
    }
    if snapshot.steps.len() > MAX_STEPS_LENGTH {
        return Err(CoreError::Validation(format!(
            "Steps must not exceed {MAX_STEPS_LENGTH} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
