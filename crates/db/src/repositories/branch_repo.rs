//! Repository for the `recipe_branches` table.
//!
//! Branches are soft-deactivated rather than deleted; a branch that a
//! fork edge references must stay on record, and the default branch can
//! never be deactivated.

use sqlx::PgPool;

use forkful_core::types::DbId;

use crate::models::branch::{Branch, CreateBranch};

/// Column list for recipe_branches queries.
const COLUMNS: &str = "id, recipe_id, branch_name, description, created_by, \
    parent_branch_id, base_version_id, is_default, is_active, created_at, updated_at";

/// Provides branch CRUD and default-branch management.
pub struct BranchRepo;

impl BranchRepo {
    /// Insert a new branch, returning the created row.
    ///
    /// New branches are never created as default; the caller is
    /// responsible for name validation and base-version checks.
    pub async fn create(
        pool: &PgPool,
        recipe_id: DbId,
        creator_id: DbId,
        input: &CreateBranch,
        base_version_id: Option<DbId>,
    ) -> Result<Branch, sqlx::Error> {
        let query = format!(
            "INSERT INTO recipe_branches
                (recipe_id, branch_name, description, created_by,
                 parent_branch_id, base_version_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Branch>(&query)
            .bind(recipe_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(creator_id)
            .bind(input.parent_branch_id)
            .bind(base_version_id)
            .fetch_one(pool)
            .await
    }

    /// Find a branch by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Branch>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recipe_branches WHERE id = $1");
        sqlx::query_as::<_, Branch>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a branch by name within a recipe (active or not).
    pub async fn find_by_name(
        pool: &PgPool,
        recipe_id: DbId,
        branch_name: &str,
    ) -> Result<Option<Branch>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recipe_branches
             WHERE recipe_id = $1 AND branch_name = $2"
        );
        sqlx::query_as::<_, Branch>(&query)
            .bind(recipe_id)
            .bind(branch_name)
            .fetch_optional(pool)
            .await
    }

    /// List active branches for a recipe, default branch first, then by
    /// creation date.
    pub async fn list_by_recipe(
        pool: &PgPool,
        recipe_id: DbId,
    ) -> Result<Vec<Branch>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recipe_branches
             WHERE recipe_id = $1 AND is_active = TRUE
             ORDER BY is_default DESC, created_at ASC"
        );
        sqlx::query_as::<_, Branch>(&query)
            .bind(recipe_id)
            .fetch_all(pool)
            .await
    }

    /// Get the default branch for a recipe.
    pub async fn get_default(
        pool: &PgPool,
        recipe_id: DbId,
    ) -> Result<Option<Branch>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recipe_branches
             WHERE recipe_id = $1 AND is_default = TRUE"
        );
        sqlx::query_as::<_, Branch>(&query)
            .bind(recipe_id)
            .fetch_optional(pool)
            .await
    }

    /// Count active branches for a recipe.
    pub async fn count_active(pool: &PgPool, recipe_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM recipe_branches WHERE recipe_id = $1 AND is_active = TRUE",
        )
        .bind(recipe_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Make a branch the default for its recipe.
    ///
    /// Runs in a transaction: unset the current default, then set the
    /// new one. Returns `None` if `branch_id` does not exist for the
    /// given recipe or is inactive.
    pub async fn set_default(
        pool: &PgPool,
        recipe_id: DbId,
        branch_id: DbId,
    ) -> Result<Option<Branch>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE recipe_branches SET is_default = FALSE
             WHERE recipe_id = $1 AND is_default = TRUE",
        )
        .bind(recipe_id)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "UPDATE recipe_branches SET is_default = TRUE
             WHERE id = $1 AND recipe_id = $2 AND is_active = TRUE
             RETURNING {COLUMNS}"
        );
        let branch = sqlx::query_as::<_, Branch>(&query)
            .bind(branch_id)
            .bind(recipe_id)
            .fetch_optional(&mut *tx)
            .await?;

        if branch.is_none() {
            // Target missing: roll back so the previous default stands.
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(branch)
    }

    /// Soft-deactivate a branch. Returns `true` if a row was updated.
    ///
    /// The default branch is refused at the SQL level; the caller must
    /// separately refuse branches referenced by fork edges.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE recipe_branches SET is_active = FALSE
             WHERE id = $1 AND is_default = FALSE AND is_active = TRUE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
