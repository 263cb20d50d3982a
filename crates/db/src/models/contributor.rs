//! Contributor ledger models.

use forkful_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `recipe_contributors` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecipeContributor {
    pub id: DbId,
    pub recipe_id: DbId,
    pub contributor_id: DbId,
    pub contribution_type: String,
    pub commit_count: i32,
    pub first_contributed_at: Timestamp,
    pub last_contributed_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A contributor joined with display identity, as returned by listings.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ContributorEntry {
    pub contributor_id: DbId,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub contribution_type: String,
    pub commit_count: i32,
    pub first_contributed_at: Timestamp,
    pub last_contributed_at: Timestamp,
}
