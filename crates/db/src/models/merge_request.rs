//! Merge request models and DTOs.

use forkful_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `recipe_merge_requests` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MergeRequest {
    pub id: DbId,
    pub source_recipe_id: DbId,
    pub source_branch: String,
    pub target_recipe_id: DbId,
    pub target_branch: String,
    pub opened_by: DbId,
    pub title: String,
    pub description: String,
    pub state: String,
    pub closed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for opening a merge request.
#[derive(Debug, Deserialize)]
pub struct OpenMergeRequest {
    pub source_recipe_id: DbId,
    pub source_branch: Option<String>,
    pub target_recipe_id: DbId,
    pub target_branch: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Input for transitioning a merge request's state.
#[derive(Debug, Deserialize)]
pub struct TransitionMergeRequest {
    pub state: forkful_core::merge::MergeRequestState,
}
