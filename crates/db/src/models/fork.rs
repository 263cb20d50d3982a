//! Fork edge models and DTOs.

use forkful_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `recipe_forks` table: one edge in the fork graph.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecipeFork {
    pub id: DbId,
    pub original_recipe_id: DbId,
    pub forked_recipe_id: DbId,
    pub forked_by_id: DbId,
    /// Branch of the original the fork was taken from.
    pub branch_name: String,
    /// The original's latest version at fork time.
    pub base_version_id: Option<DbId>,
    pub fork_reason: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for forking a recipe.
#[derive(Debug, Default, Deserialize)]
pub struct CreateFork {
    #[serde(default)]
    pub fork_reason: String,
    /// Branch of the original to fork from. Defaults to `main`.
    pub branch: Option<String>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// One node in a fork tree, produced by the breadth-first traversal.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ForkTreeEntry {
    pub fork_id: DbId,
    pub forked_recipe_id: DbId,
    pub title: String,
    pub forked_by_id: DbId,
    pub forked_by_username: String,
    pub forked_by_name: String,
    /// Distance from the traversal root (direct forks are depth 1).
    #[sqlx(skip)]
    pub depth: i32,
    pub created_at: Timestamp,
}
