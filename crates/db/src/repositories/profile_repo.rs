//! Repository for the `profiles` table.
//!
//! Profiles are a read model for the external identity provider; the
//! engine only registers and reads them.

use sqlx::PgPool;

use forkful_core::types::DbId;

use crate::models::profile::{CreateProfile, Profile};

/// Column list for profiles queries.
const COLUMNS: &str = "id, username, display_name, avatar_url, created_at, updated_at";

/// Provides registration and lookup for identity profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a new profile, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProfile) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (username, display_name, avatar_url)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(&input.username)
            .bind(&input.display_name)
            .bind(&input.avatar_url)
            .fetch_one(pool)
            .await
    }

    /// Find a profile by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a profile by username.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE username = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }
}
