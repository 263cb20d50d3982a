//! Repository for the `recipe_contributors` table.
//!
//! The ledger is maintained with a single atomic insert-or-increment:
//! concurrent commits by the same author cannot lose an update, and
//! `commit_count` never decreases. The first recorded role sticks.

use sqlx::PgPool;

use forkful_core::contribution::ContributionType;
use forkful_core::types::DbId;

use crate::models::contributor::{ContributorEntry, RecipeContributor};

/// Column list for recipe_contributors queries.
const COLUMNS: &str = "id, recipe_id, contributor_id, contribution_type, commit_count, \
    first_contributed_at, last_contributed_at, created_at, updated_at";

/// Provides the contributor upsert and ledger reads.
pub struct ContributorRepo;

impl ContributorRepo {
    /// Record a contribution: insert with `commit_count = 1`, or bump
    /// the count and `last_contributed_at` for an existing pair.
    pub async fn record(
        pool: &PgPool,
        recipe_id: DbId,
        contributor_id: DbId,
        contribution_type: ContributionType,
    ) -> Result<RecipeContributor, sqlx::Error> {
        let query = format!(
            "INSERT INTO recipe_contributors (recipe_id, contributor_id, contribution_type)
             VALUES ($1, $2, $3)
             ON CONFLICT (recipe_id, contributor_id) DO UPDATE SET
                 commit_count = recipe_contributors.commit_count + 1,
                 last_contributed_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RecipeContributor>(&query)
            .bind(recipe_id)
            .bind(contributor_id)
            .bind(contribution_type.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find the ledger row for a given recipe/user pair.
    pub async fn find(
        pool: &PgPool,
        recipe_id: DbId,
        contributor_id: DbId,
    ) -> Result<Option<RecipeContributor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recipe_contributors
             WHERE recipe_id = $1 AND contributor_id = $2"
        );
        sqlx::query_as::<_, RecipeContributor>(&query)
            .bind(recipe_id)
            .bind(contributor_id)
            .fetch_optional(pool)
            .await
    }

    /// List contributors with display identity, busiest first, ties
    /// broken by who contributed earliest.
    pub async fn list_by_recipe(
        pool: &PgPool,
        recipe_id: DbId,
    ) -> Result<Vec<ContributorEntry>, sqlx::Error> {
        sqlx::query_as(
            "SELECT c.contributor_id, p.username, p.display_name, p.avatar_url,
                    c.contribution_type, c.commit_count,
                    c.first_contributed_at, c.last_contributed_at
             FROM recipe_contributors c
             JOIN profiles p ON p.id = c.contributor_id
             WHERE c.recipe_id = $1
             ORDER BY c.commit_count DESC, c.first_contributed_at ASC",
        )
        .bind(recipe_id)
        .fetch_all(pool)
        .await
    }

    /// Count contributors for a recipe.
    pub async fn count_by_recipe(pool: &PgPool, recipe_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM recipe_contributors WHERE recipe_id = $1")
                .bind(recipe_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}
