//! Branch models and DTOs.
//!
//! Branches are named mutable pointers into a recipe's history. Every
//! recipe has exactly one default branch; branches are soft-deactivated
//! rather than removed.

use forkful_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `recipe_branches` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Branch {
    pub id: DbId,
    pub recipe_id: DbId,
    pub branch_name: String,
    pub description: String,
    pub created_by: DbId,
    pub parent_branch_id: Option<DbId>,
    pub base_version_id: Option<DbId>,
    pub is_default: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for creating a new branch. New branches are never default.
#[derive(Debug, Deserialize)]
pub struct CreateBranch {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Version to base the branch on. Defaults to the recipe's latest
    /// version when omitted.
    pub base_version_id: Option<DbId>,
    pub parent_branch_id: Option<DbId>,
}
