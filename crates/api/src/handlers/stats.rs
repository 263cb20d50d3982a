//! Read-only facade: repository statistics and pairwise comparison.
//!
//! Both paths compose the other components without mutating anything.
//! Stats cross-checks the stored `version_count` against the commit
//! ledger and surfaces a mismatch as an integrity violation instead of
//! repairing it.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use forkful_core::compare::compare_snapshots;
use forkful_core::error::CoreError;
use forkful_core::types::DbId;
use forkful_db::models::stats::{CompareResponse, RecipeRef, RecipeStats, StatCounts};
use forkful_db::repositories::{BranchRepo, ContributorRepo, VersionRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_recipe;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /recipes/{id}/stats
pub async fn get_stats(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let recipe = ensure_recipe(&state.pool, id).await?;

    let versions = VersionRepo::count_by_recipe(&state.pool, id).await?;
    if versions != i64::from(recipe.version_count) {
        return Err(AppError::Core(CoreError::Integrity(format!(
            "Recipe {id} version_count is {} but {versions} commits are recorded",
            recipe.version_count
        ))));
    }

    let contributors = ContributorRepo::count_by_recipe(&state.pool, id).await?;
    let branches = BranchRepo::count_active(&state.pool, id).await?;
    let latest_commit = VersionRepo::latest(&state.pool, id).await?;

    let stats = RecipeStats {
        recipe_id: recipe.id,
        title: recipe.title,
        is_fork: recipe.is_fork,
        original_recipe_id: recipe.original_recipe_id,
        stats: StatCounts {
            forks: i64::from(recipe.fork_count),
            // Maintained by the star/like collaborator; read here only.
            stars: i64::from(recipe.star_count),
            versions,
            contributors,
            branches,
        },
        latest_commit,
        created_at: recipe.created_at,
        updated_at: recipe.updated_at,
    };

    Ok(Json(DataResponse { data: stats }))
}

/// GET /recipes/{id}/compare/{other_id}
///
/// Compare the current snapshots of two recipes. Comparing a recipe to
/// itself yields an empty descriptor.
pub async fn compare_recipes(
    State(state): State<AppState>,
    Path((id, other_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let base = ensure_recipe(&state.pool, id).await?;
    let other = ensure_recipe(&state.pool, other_id).await?;

    let comparison =
        compare_snapshots(&base.snapshot(), &other.snapshot()).map_err(AppError::Core)?;

    let response = CompareResponse {
        base_recipe: RecipeRef {
            id: base.id,
            title: base.title,
        },
        compare_recipe: RecipeRef {
            id: other.id,
            title: other.title,
        },
        comparison,
    };

    Ok(Json(DataResponse { data: response }))
}
