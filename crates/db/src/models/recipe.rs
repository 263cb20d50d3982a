//! Recipe entity and content DTOs.

use forkful_core::snapshot::{Ingredient, RecipeSnapshot, SNAPSHOT_SCHEMA_VERSION};
use forkful_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `recipes` table.
///
/// Content columns hold the live working state; counter columns are
/// derived and only ever touched inside repository transactions.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Recipe {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: String,
    pub servings: i32,
    pub steps: String,
    pub ingredients: Json<Vec<Ingredient>>,
    pub prep_time_minutes: i32,
    pub cook_time_minutes: i32,
    pub difficulty: String,
    pub version_count: i32,
    pub fork_count: i32,
    pub star_count: i32,
    pub is_fork: bool,
    pub original_recipe_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Recipe {
    /// Current content as a snapshot, suitable for diffing and for
    /// storage in a commit row.
    pub fn snapshot(&self) -> RecipeSnapshot {
        RecipeSnapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            title: self.title.clone(),
            description: self.description.clone(),
            ingredients: self.ingredients.0.clone(),
            steps: self.steps.clone(),
            servings: self.servings,
            category: self.category.clone(),
            tags: self.tags.clone(),
            prep_time_minutes: self.prep_time_minutes,
            cook_time_minutes: self.cook_time_minutes,
            difficulty: self.difficulty.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Commit DTO
// ---------------------------------------------------------------------------

/// Input for committing new content to a recipe.
#[derive(Debug, Deserialize)]
pub struct CommitRecipe {
    pub message: String,
    pub content: RecipeSnapshot,
}

/// Query params for paginated recipe listings.
#[derive(Debug, Deserialize)]
pub struct ListRecipesParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
