//! Repository for the `recipe_versions` table.
//!
//! The commit path is the heart of the engine: it serializes writers on
//! the same recipe through the recipe row lock, allocates gap-free
//! version numbers from the `version_count` counter, and keeps the
//! contributor ledger in step — all in one transaction.

use sqlx::types::Json;
use sqlx::PgPool;

use forkful_core::contribution::ContributionType;
use forkful_core::diff;
use forkful_core::snapshot::RecipeSnapshot;
use forkful_core::types::DbId;

use crate::error::DbError;
use crate::models::recipe::Recipe;
use crate::models::version::{CommitEntry, RecipeVersion};

/// Column list for recipe_versions queries.
const COLUMNS: &str = "id, recipe_id, version_number, commit_message, author_id, \
    parent_version_id, changes, snapshot, created_at, updated_at";

/// Column list for the recipes row loaded under lock in [`VersionRepo::commit`].
const RECIPE_COLUMNS: &str = "id, owner_id, title, description, category, tags, servings, \
    steps, ingredients, prep_time_minutes, cook_time_minutes, difficulty, version_count, \
    fork_count, star_count, is_fork, original_recipe_id, created_at, updated_at";

/// Column list for history entries (commit joined with author profile).
const ENTRY_COLUMNS: &str = "v.id AS version_id, v.version_number, v.commit_message, \
    v.author_id, p.username AS author_username, p.display_name AS author_name, \
    p.avatar_url AS author_avatar_url, v.changes, v.created_at";

/// Provides the commit operation and read access to commit history.
pub struct VersionRepo;

impl VersionRepo {
    /// Commit new content to a recipe.
    ///
    /// Locks the recipe row, diffs the stored state against `content`,
    /// and — when anything changed — applies the update, reserves the
    /// next version number via `version_count + 1 ... RETURNING`, links
    /// the parent commit, inserts the version, and upserts the author's
    /// contributor row. Returns `None` when the diff is empty (no
    /// version is created).
    ///
    /// Commits to different recipes never contend; commits to the same
    /// recipe serialize on the row lock, which is what makes the
    /// numbering gap-free.
    pub async fn commit(
        pool: &PgPool,
        recipe_id: DbId,
        author_id: DbId,
        message: &str,
        content: &RecipeSnapshot,
    ) -> Result<Option<RecipeVersion>, DbError> {
        let mut tx = pool.begin().await?;

        let lock_query = format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1 FOR UPDATE");
        let recipe = sqlx::query_as::<_, Recipe>(&lock_query)
            .bind(recipe_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        let changes = diff::compute_changes(&recipe.snapshot(), content)?;
        if changes.is_empty() {
            // Nothing to record; the open transaction rolls back on drop.
            return Ok(None);
        }

        let next: (i32,) = sqlx::query_as(
            "UPDATE recipes SET
                title = $2, description = $3, category = $4, tags = $5,
                servings = $6, steps = $7, ingredients = $8,
                prep_time_minutes = $9, cook_time_minutes = $10, difficulty = $11,
                version_count = version_count + 1
             WHERE id = $1
             RETURNING version_count",
        )
        .bind(recipe_id)
        .bind(&content.title)
        .bind(&content.description)
        .bind(&content.category)
        .bind(&content.tags)
        .bind(content.servings)
        .bind(&content.steps)
        .bind(Json(&content.ingredients))
        .bind(content.prep_time_minutes)
        .bind(content.cook_time_minutes)
        .bind(&content.difficulty)
        .fetch_one(&mut *tx)
        .await?;

        let parent: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM recipe_versions WHERE recipe_id = $1 AND version_number = $2",
        )
        .bind(recipe_id)
        .bind(next.0 - 1)
        .fetch_optional(&mut *tx)
        .await?;

        let insert_query = format!(
            "INSERT INTO recipe_versions
                (recipe_id, version_number, commit_message, author_id,
                 parent_version_id, changes, snapshot)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let version = sqlx::query_as::<_, RecipeVersion>(&insert_query)
            .bind(recipe_id)
            .bind(next.0)
            .bind(message)
            .bind(author_id)
            .bind(parent.map(|p| p.0))
            .bind(Json(&changes))
            .bind(Json(content))
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO recipe_contributors (recipe_id, contributor_id, contribution_type)
             VALUES ($1, $2, $3)
             ON CONFLICT (recipe_id, contributor_id) DO UPDATE SET
                 commit_count = recipe_contributors.commit_count + 1,
                 last_contributed_at = NOW()",
        )
        .bind(recipe_id)
        .bind(author_id)
        .bind(ContributionType::Editor.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(version))
    }

    /// Find a version by its primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RecipeVersion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recipe_versions WHERE id = $1");
        sqlx::query_as::<_, RecipeVersion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a specific version of a recipe by number.
    pub async fn find_by_recipe_and_number(
        pool: &PgPool,
        recipe_id: DbId,
        version_number: i32,
    ) -> Result<Option<RecipeVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recipe_versions
             WHERE recipe_id = $1 AND version_number = $2"
        );
        sqlx::query_as::<_, RecipeVersion>(&query)
            .bind(recipe_id)
            .bind(version_number)
            .fetch_optional(pool)
            .await
    }

    /// Check that a version id belongs to the given recipe.
    pub async fn belongs_to_recipe(
        pool: &PgPool,
        version_id: DbId,
        recipe_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM recipe_versions WHERE id = $1 AND recipe_id = $2",
        )
        .bind(version_id)
        .bind(recipe_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.is_some())
    }

    /// Paginated commit history, newest first, with author identity.
    ///
    /// Returns an empty list (not an error) for a recipe with no
    /// commits.
    pub async fn history(
        pool: &PgPool,
        recipe_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CommitEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {ENTRY_COLUMNS}
             FROM recipe_versions v
             JOIN profiles p ON p.id = v.author_id
             WHERE v.recipe_id = $1
             ORDER BY v.version_number DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, CommitEntry>(&query)
            .bind(recipe_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// The latest commit for a recipe, with author identity.
    pub async fn latest(
        pool: &PgPool,
        recipe_id: DbId,
    ) -> Result<Option<CommitEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {ENTRY_COLUMNS}
             FROM recipe_versions v
             JOIN profiles p ON p.id = v.author_id
             WHERE v.recipe_id = $1
             ORDER BY v.version_number DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, CommitEntry>(&query)
            .bind(recipe_id)
            .fetch_optional(pool)
            .await
    }

    /// Count commits recorded for a recipe.
    pub async fn count_by_recipe(pool: &PgPool, recipe_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM recipe_versions WHERE recipe_id = $1")
                .bind(recipe_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}
