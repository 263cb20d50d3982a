//! Handlers for the commit operation and commit history.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use forkful_core::error::CoreError;
use forkful_core::pagination::{clamp_limit, clamp_offset, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT};
use forkful_core::recipe::{validate_commit_message, validate_content};
use forkful_core::types::DbId;
use forkful_db::models::recipe::CommitRecipe;
use forkful_db::repositories::{RecipeRepo, VersionRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{ensure_owner, ensure_recipe};
use crate::identity::RequestUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, serde::Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /recipes/{id}/commit
///
/// Commit new content. Responds 201 with the new version, or 200 with
/// `data: null` when the content is unchanged and no version was
/// created.
pub async fn commit(
    user: RequestUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CommitRecipe>,
) -> AppResult<impl IntoResponse> {
    validate_commit_message(&input.message).map_err(AppError::Core)?;
    validate_content(&input.content).map_err(AppError::Core)?;

    let recipe = ensure_recipe(&state.pool, id).await?;
    ensure_owner(&recipe, user.user_id)?;

    // A title change must not collide with the author's other recipes.
    if input.content.title != recipe.title
        && RecipeRepo::title_exists(&state.pool, user.user_id, &input.content.title, Some(id))
            .await?
    {
        return Err(AppError::Core(CoreError::Conflict(
            "A recipe with this title already exists".into(),
        )));
    }

    let version =
        VersionRepo::commit(&state.pool, id, user.user_id, &input.message, &input.content)
            .await?;

    let status = if version.is_some() {
        tracing::info!(
            user_id = user.user_id,
            recipe_id = id,
            version_number = version.as_ref().map(|v| v.version_number),
            "Commit recorded"
        );
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(DataResponse { data: version })))
}

/// GET /recipes/{id}/history
///
/// Paginated commit history, newest first, with author identity.
pub async fn history(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<HistoryParams>,
) -> AppResult<impl IntoResponse> {
    ensure_recipe(&state.pool, id).await?;

    let limit = clamp_limit(params.limit, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT);
    let offset = clamp_offset(params.offset);

    let commits = VersionRepo::history(&state.pool, id, limit, offset).await?;
    Ok(Json(DataResponse { data: commits }))
}
