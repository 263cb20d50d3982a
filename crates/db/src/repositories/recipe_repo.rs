//! Repository for the `recipes` table.
//!
//! Creation seeds the full repository shape (version 1, default branch,
//! creator contributor) in one transaction so a recipe is never visible
//! without its history scaffolding.

use sqlx::types::Json;
use sqlx::PgPool;

use forkful_core::branching::DEFAULT_BRANCH;
use forkful_core::contribution::ContributionType;
use forkful_core::diff::ChangeDescriptor;
use forkful_core::snapshot::RecipeSnapshot;
use forkful_core::types::DbId;

use crate::models::recipe::Recipe;

/// Column list for recipes queries.
const COLUMNS: &str = "id, owner_id, title, description, category, tags, servings, steps, \
    ingredients, prep_time_minutes, cook_time_minutes, difficulty, version_count, \
    fork_count, star_count, is_fork, original_recipe_id, created_at, updated_at";

/// Provides CRUD and repository-seeding operations for recipes.
pub struct RecipeRepo;

impl RecipeRepo {
    /// Create a recipe from initial content.
    ///
    /// One transaction seeds the recipe row (`version_count = 1`),
    /// version 1, the default branch based on it, and the owner's
    /// `creator` contributor row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        content: &RecipeSnapshot,
    ) -> Result<Recipe, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_recipe = format!(
            "INSERT INTO recipes
                (owner_id, title, description, category, tags, servings, steps,
                 ingredients, prep_time_minutes, cook_time_minutes, difficulty,
                 version_count)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 1)
             RETURNING {COLUMNS}"
        );
        let recipe = sqlx::query_as::<_, Recipe>(&insert_recipe)
            .bind(owner_id)
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

        let version_id: (DbId,) = sqlx::query_as(
            "INSERT INTO recipe_versions
                (recipe_id, version_number, commit_message, author_id, changes, snapshot)
             VALUES ($1, 1, 'Initial recipe creation', $2, $3, $4)
             RETURNING id",
        )
        .bind(recipe.id)
        .bind(owner_id)
        .bind(Json(ChangeDescriptor::creation()))
        .bind(Json(content))
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO recipe_branches
                (recipe_id, branch_name, description, created_by, base_version_id, is_default)
             VALUES ($1, $2, 'Main recipe branch', $3, $4, TRUE)",
        )
        .bind(recipe.id)
        .bind(DEFAULT_BRANCH)
        .bind(owner_id)
        .bind(version_id.0)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO recipe_contributors (recipe_id, contributor_id, contribution_type)
             VALUES ($1, $2, $3)",
        )
        .bind(recipe.id)
        .bind(owner_id)
        .bind(ContributionType::Creator.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(recipe)
    }

    /// Find a recipe by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recipes WHERE id = $1");
        sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's recipes, most recently updated first.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Recipe>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recipes
             WHERE owner_id = $1
             ORDER BY updated_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(owner_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Check whether a user already has a recipe with the given title,
    /// optionally excluding one recipe id (for title changes).
    pub async fn title_exists(
        pool: &PgPool,
        owner_id: DbId,
        title: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM recipes
             WHERE owner_id = $1 AND title = $2 AND ($3::BIGINT IS NULL OR id != $3)
             LIMIT 1",
        )
        .bind(owner_id)
        .bind(title)
        .bind(exclude_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.is_some())
    }

    /// Delete a recipe by ID. Returns `true` if a row was deleted.
    ///
    /// Versions, branches, contributor rows, merge requests, and fork
    /// edges in both directions cascade away; forked descendants
    /// survive with `original_recipe_id` nulled.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
