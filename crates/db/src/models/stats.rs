//! Repository-style statistics and comparison payloads, composed by
//! the read-only facade paths.

use forkful_core::compare::RecipeComparison;
use forkful_core::types::{DbId, Timestamp};
use serde::Serialize;

use crate::models::version::CommitEntry;

/// Counter block inside [`RecipeStats`].
#[derive(Debug, Clone, Serialize)]
pub struct StatCounts {
    pub forks: i64,
    pub stars: i64,
    pub versions: i64,
    pub contributors: i64,
    pub branches: i64,
}

/// Git-style statistics for one recipe.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeStats {
    pub recipe_id: DbId,
    pub title: String,
    pub is_fork: bool,
    pub original_recipe_id: Option<DbId>,
    pub stats: StatCounts,
    pub latest_commit: Option<CommitEntry>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Identifying pair used in comparison payloads.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeRef {
    pub id: DbId,
    pub title: String,
}

/// Response for the pairwise recipe comparison.
#[derive(Debug, Clone, Serialize)]
pub struct CompareResponse {
    pub base_recipe: RecipeRef,
    pub compare_recipe: RecipeRef,
    #[serde(flatten)]
    pub comparison: RecipeComparison,
}
