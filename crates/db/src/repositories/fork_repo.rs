//! Repository for the `recipe_forks` table and the fork graph.
//!
//! Forking copies the original's current state into a brand-new recipe
//! repository in one transaction; the fork tree is traversed
//! breadth-first over the edge table rather than with a recursive
//! query, with a visited set and depth cap guarding against corrupted
//! lineage data.

use std::collections::HashSet;

use sqlx::types::Json;
use sqlx::PgPool;

use forkful_core::branching::DEFAULT_BRANCH;
use forkful_core::contribution::ContributionType;
use forkful_core::diff::ChangeDescriptor;
use forkful_core::error::CoreError;
use forkful_core::forking::{initial_fork_message, MAX_FORK_TREE_DEPTH};
use forkful_core::types::DbId;

use crate::error::DbError;
use crate::models::fork::{ForkTreeEntry, RecipeFork};
use crate::models::recipe::Recipe;

/// Column list for recipe_forks queries.
const COLUMNS: &str = "id, original_recipe_id, forked_recipe_id, forked_by_id, \
    branch_name, base_version_id, fork_reason, created_at, updated_at";

/// Column list for the recipes rows handled inside [`ForkRepo::create`].
const RECIPE_COLUMNS: &str = "id, owner_id, title, description, category, tags, servings, \
    steps, ingredients, prep_time_minutes, cook_time_minutes, difficulty, version_count, \
    fork_count, star_count, is_fork, original_recipe_id, created_at, updated_at";

/// The fork operation's result: the edge and the new recipe repository.
#[derive(Debug, serde::Serialize)]
pub struct ForkOutcome {
    pub fork: RecipeFork,
    pub recipe: Recipe,
}

/// Provides fork creation and fork-graph queries.
pub struct ForkRepo;

impl ForkRepo {
    /// Fork a recipe for a user.
    ///
    /// One transaction: lock the original, reject a repeat fork by the
    /// same user, copy the original's current content into a new recipe
    /// (`is_fork = TRUE`, `version_count = 1`), record version 1, seed
    /// the default branch, upsert the `forker` contributor row, insert
    /// the fork edge, and bump the original's `fork_count`. Any failure
    /// rolls the whole sequence back.
    pub async fn create(
        pool: &PgPool,
        original_recipe_id: DbId,
        user_id: DbId,
        fork_reason: &str,
        source_branch: Option<&str>,
    ) -> Result<ForkOutcome, DbError> {
        let mut tx = pool.begin().await?;

        let lock_query = format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1 FOR UPDATE");
        let original = sqlx::query_as::<_, Recipe>(&lock_query)
            .bind(original_recipe_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        let existing: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM recipe_forks
             WHERE original_recipe_id = $1 AND forked_by_id = $2",
        )
        .bind(original_recipe_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;
        if existing.is_some() {
            return Err(CoreError::Conflict(
                "Recipe has already been forked by this user".to_string(),
            )
            .into());
        }

        let branch_name = source_branch.unwrap_or(DEFAULT_BRANCH);
        let branch: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM recipe_branches
             WHERE recipe_id = $1 AND branch_name = $2 AND is_active = TRUE",
        )
        .bind(original_recipe_id)
        .bind(branch_name)
        .fetch_optional(&mut *tx)
        .await?;
        if branch.is_none() {
            return Err(CoreError::Validation(format!(
                "Branch '{branch_name}' does not exist on recipe {original_recipe_id}"
            ))
            .into());
        }

        let base_version: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM recipe_versions
             WHERE recipe_id = $1
             ORDER BY version_number DESC
             LIMIT 1",
        )
        .bind(original_recipe_id)
        .fetch_optional(&mut *tx)
        .await?;

        let snapshot = original.snapshot();

        let insert_recipe = format!(
            "INSERT INTO recipes
                (owner_id, title, description, category, tags, servings, steps,
                 ingredients, prep_time_minutes, cook_time_minutes, difficulty,
                 version_count, is_fork, original_recipe_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 1, TRUE, $12)
             RETURNING {RECIPE_COLUMNS}"
        );
        let forked = sqlx::query_as::<_, Recipe>(&insert_recipe)
            .bind(user_id)
            .bind(&snapshot.title)
            .bind(&snapshot.description)
            .bind(&snapshot.category)
            .bind(&snapshot.tags)
            .bind(snapshot.servings)
            .bind(&snapshot.steps)
            .bind(Json(&snapshot.ingredients))
            .bind(snapshot.prep_time_minutes)
            .bind(snapshot.cook_time_minutes)
            .bind(&snapshot.difficulty)
            .bind(original_recipe_id)
            .fetch_one(&mut *tx)
            .await?;

        let version_id: (DbId,) = sqlx::query_as(
            "INSERT INTO recipe_versions
                (recipe_id, version_number, commit_message, author_id, changes, snapshot)
             VALUES ($1, 1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(forked.id)
        .bind(initial_fork_message(original_recipe_id))
        .bind(user_id)
        .bind(Json(ChangeDescriptor::fork_from(original_recipe_id)))
        .bind(Json(&snapshot))
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO recipe_branches
                (recipe_id, branch_name, description, created_by, base_version_id, is_default)
             VALUES ($1, $2, 'Main recipe branch', $3, $4, TRUE)",
        )
        .bind(forked.id)
        .bind(DEFAULT_BRANCH)
        .bind(user_id)
        .bind(version_id.0)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO recipe_contributors (recipe_id, contributor_id, contribution_type)
             VALUES ($1, $2, $3)",
        )
        .bind(forked.id)
        .bind(user_id)
        .bind(ContributionType::Forker.as_str())
        .execute(&mut *tx)
        .await?;

        let insert_fork = format!(
            "INSERT INTO recipe_forks
                (original_recipe_id, forked_recipe_id, forked_by_id, branch_name,
                 base_version_id, fork_reason)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let fork = sqlx::query_as::<_, RecipeFork>(&insert_fork)
            .bind(original_recipe_id)
            .bind(forked.id)
            .bind(user_id)
            .bind(branch_name)
            .bind(base_version.map(|v| v.0))
            .bind(fork_reason)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE recipes SET fork_count = fork_count + 1 WHERE id = $1")
            .bind(original_recipe_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(ForkOutcome {
            fork,
            recipe: forked,
        })
    }

    /// Find the fork edge for a given original/user pair.
    pub async fn find_by_original_and_user(
        pool: &PgPool,
        original_recipe_id: DbId,
        user_id: DbId,
    ) -> Result<Option<RecipeFork>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recipe_forks
             WHERE original_recipe_id = $1 AND forked_by_id = $2"
        );
        sqlx::query_as::<_, RecipeFork>(&query)
            .bind(original_recipe_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a user has already forked this recipe.
    pub async fn is_forked_by(
        pool: &PgPool,
        original_recipe_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        Ok(Self::find_by_original_and_user(pool, original_recipe_id, user_id)
            .await?
            .is_some())
    }

    /// Count direct forks of a recipe.
    pub async fn count_by_original(
        pool: &PgPool,
        original_recipe_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM recipe_forks WHERE original_recipe_id = $1")
                .bind(original_recipe_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// Whether any fork edge references the given branch of a recipe.
    ///
    /// Used to refuse deactivating a branch that lineage records point
    /// at.
    pub async fn references_branch(
        pool: &PgPool,
        recipe_id: DbId,
        branch_name: &str,
    ) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM recipe_forks
             WHERE original_recipe_id = $1 AND branch_name = $2
             LIMIT 1",
        )
        .bind(recipe_id)
        .bind(branch_name)
        .fetch_optional(pool)
        .await?;
        Ok(row.is_some())
    }

    /// The transitive fork tree below a recipe, breadth-first.
    ///
    /// Entries are ordered by depth, then newest fork first within a
    /// level. Traversal follows `original_recipe_id = ANY(frontier)`
    /// one level at a time; the visited set and
    /// [`MAX_FORK_TREE_DEPTH`] cap make it terminate even if corrupted
    /// data were to introduce a cycle.
    pub async fn tree(
        pool: &PgPool,
        recipe_id: DbId,
    ) -> Result<Vec<ForkTreeEntry>, sqlx::Error> {
        let mut entries: Vec<ForkTreeEntry> = Vec::new();
        let mut visited: HashSet<DbId> = HashSet::from([recipe_id]);
        let mut frontier: Vec<DbId> = vec![recipe_id];
        let mut depth: i32 = 1;

        while !frontier.is_empty() && depth <= MAX_FORK_TREE_DEPTH {
            let rows: Vec<ForkTreeEntry> = sqlx::query_as(
                "SELECT f.id AS fork_id, f.forked_recipe_id, r.title,
                        f.forked_by_id, p.username AS forked_by_username,
                        p.display_name AS forked_by_name, f.created_at
                 FROM recipe_forks f
                 JOIN recipes r ON r.id = f.forked_recipe_id
                 JOIN profiles p ON p.id = f.forked_by_id
                 WHERE f.original_recipe_id = ANY($1)
                 ORDER BY f.created_at DESC",
            )
            .bind(&frontier)
            .fetch_all(pool)
            .await?;

            frontier = Vec::new();
            for mut entry in rows {
                if !visited.insert(entry.forked_recipe_id) {
                    continue;
                }
                entry.depth = depth;
                frontier.push(entry.forked_recipe_id);
                entries.push(entry);
            }
            depth += 1;
        }

        if !frontier.is_empty() {
            tracing::warn!(
                recipe_id,
                max_depth = MAX_FORK_TREE_DEPTH,
                "Fork tree traversal hit the depth cap; result truncated"
            );
        }

        Ok(entries)
    }
}
