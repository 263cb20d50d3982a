//! Commit (version) models.
//!
//! Versions are immutable: once inserted they are only ever read. The
//! change descriptor and full snapshot are stored as JSONB and decode
//! through the typed core structs.

use forkful_core::diff::ChangeDescriptor;
use forkful_core::snapshot::RecipeSnapshot;
use forkful_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `recipe_versions` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecipeVersion {
    pub id: DbId,
    pub recipe_id: DbId,
    pub version_number: i32,
    pub commit_message: String,
    pub author_id: DbId,
    pub parent_version_id: Option<DbId>,
    pub changes: Json<ChangeDescriptor>,
    pub snapshot: Json<RecipeSnapshot>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A history entry: a commit joined with its author's display identity.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommitEntry {
    pub version_id: DbId,
    pub version_number: i32,
    pub commit_message: String,
    pub author_id: DbId,
    pub author_username: String,
    pub author_name: String,
    pub author_avatar_url: Option<String>,
    pub changes: Json<ChangeDescriptor>,
    pub created_at: Timestamp,
}
