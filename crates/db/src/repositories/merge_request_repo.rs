//! Repository for the `recipe_merge_requests` table.

use sqlx::PgPool;

use forkful_core::error::CoreError;
use forkful_core::merge::{self, MergeRequestState};
use forkful_core::types::DbId;

use crate::error::DbError;
use crate::models::merge_request::{MergeRequest, OpenMergeRequest};

/// Column list for recipe_merge_requests queries.
const COLUMNS: &str = "id, source_recipe_id, source_branch, target_recipe_id, \
    target_branch, opened_by, title, description, state, closed_at, created_at, updated_at";

/// Provides merge request lifecycle operations.
pub struct MergeRequestRepo;

impl MergeRequestRepo {
    /// Open a merge request. The caller validates that both endpoints
    /// exist and name real branches.
    pub async fn open(
        pool: &PgPool,
        opened_by: DbId,
        input: &OpenMergeRequest,
        source_branch: &str,
        target_branch: &str,
    ) -> Result<MergeRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO recipe_merge_requests
                (source_recipe_id, source_branch, target_recipe_id, target_branch,
                 opened_by, title, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MergeRequest>(&query)
            .bind(input.source_recipe_id)
            .bind(source_branch)
            .bind(input.target_recipe_id)
            .bind(target_branch)
            .bind(opened_by)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a merge request by its primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MergeRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recipe_merge_requests WHERE id = $1");
        sqlx::query_as::<_, MergeRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List merge requests targeting a recipe, optionally filtered by
    /// state, newest first.
    pub async fn list_by_target(
        pool: &PgPool,
        target_recipe_id: DbId,
        state: Option<MergeRequestState>,
    ) -> Result<Vec<MergeRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recipe_merge_requests
             WHERE target_recipe_id = $1 AND ($2::TEXT IS NULL OR state = $2)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, MergeRequest>(&query)
            .bind(target_recipe_id)
            .bind(state.map(|s| s.as_str()))
            .fetch_all(pool)
            .await
    }

    /// Transition a merge request out of `open`.
    ///
    /// Locks the row, validates the transition, stamps `closed_at`, and
    /// returns the updated row. `None` if the id is unknown; Conflict
    /// if the request already left `open`.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        to: MergeRequestState,
    ) -> Result<Option<MergeRequest>, DbError> {
        let mut tx = pool.begin().await?;

        let current: Option<(String,)> = sqlx::query_as(
            "SELECT state FROM recipe_merge_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((state,)) = current else {
            return Ok(None);
        };
        let from = MergeRequestState::parse(&state).ok_or_else(|| {
            CoreError::Integrity(format!("Unknown merge request state '{state}'"))
        })?;
        merge::validate_transition(from, to)?;

        let query = format!(
            "UPDATE recipe_merge_requests
             SET state = $2, closed_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, MergeRequest>(&query)
            .bind(id)
            .bind(to.as_str())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }
}
