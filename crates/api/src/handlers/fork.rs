//! Handlers for forking and fork-lineage queries.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use forkful_core::error::CoreError;
use forkful_core::forking::validate_fork_reason;
use forkful_core::types::DbId;
use forkful_db::models::fork::CreateFork;
use forkful_db::repositories::ForkRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_recipe;
use crate::identity::RequestUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /recipes/{id}/fork
///
/// Fork a recipe for the requesting user. Fails with 409 when the user
/// already forked this recipe.
pub async fn fork_recipe(
    user: RequestUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateFork>,
) -> AppResult<impl IntoResponse> {
    validate_fork_reason(&input.fork_reason).map_err(AppError::Core)?;
    ensure_recipe(&state.pool, id).await?;

    if ForkRepo::is_forked_by(&state.pool, id, user.user_id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Recipe has already been forked by this user".into(),
        )));
    }

    let outcome = ForkRepo::create(
        &state.pool,
        id,
        user.user_id,
        &input.fork_reason,
        input.branch.as_deref(),
    )
    .await?;

    tracing::info!(
        user_id = user.user_id,
        original_recipe_id = id,
        forked_recipe_id = outcome.recipe.id,
        "Recipe forked"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: outcome })))
}

/// GET /recipes/{id}/forks
///
/// The transitive fork tree below a recipe, ordered by depth then
/// recency. Empty list for a recipe with no forks.
pub async fn fork_tree(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_recipe(&state.pool, id).await?;
    let tree = ForkRepo::tree(&state.pool, id).await?;
    Ok(Json(DataResponse { data: tree }))
}
