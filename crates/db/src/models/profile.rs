//! Identity read model.
//!
//! Profiles are owned by the external identity provider; the engine
//! stores the identifier and display metadata for joins, and never
//! authenticates.

use forkful_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `profiles` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Profile {
    pub id: DbId,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for registering an identity (pushed by the identity provider).
#[derive(Debug, Deserialize)]
pub struct CreateProfile {
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    pub avatar_url: Option<String>,
}
