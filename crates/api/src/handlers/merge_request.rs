//! Handlers for the merge request lifecycle.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use forkful_core::branching::DEFAULT_BRANCH;
use forkful_core::error::CoreError;
use forkful_core::merge::MergeRequestState;
use forkful_core::recipe::validate_title;
use forkful_core::types::DbId;
use forkful_db::models::merge_request::{OpenMergeRequest, TransitionMergeRequest};
use forkful_db::repositories::{BranchRepo, MergeRequestRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_recipe;
use crate::identity::RequestUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, serde::Deserialize)]
pub struct ListMergeRequestsParams {
    pub state: Option<String>,
}

/// Check that the named branch exists and is active on the recipe.
async fn ensure_branch(pool: &sqlx::PgPool, recipe_id: DbId, name: &str) -> AppResult<()> {
    let branch = BranchRepo::find_by_name(pool, recipe_id, name).await?;
    if !branch.map(|b| b.is_active).unwrap_or(false) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Branch '{name}' does not exist on recipe {recipe_id}"
        ))));
    }
    Ok(())
}

/// POST /merge-requests
///
/// Open a merge request proposing to integrate one recipe/branch into
/// another.
pub async fn open_merge_request(
    user: RequestUser,
    State(state): State<AppState>,
    Json(input): Json<OpenMergeRequest>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.title).map_err(AppError::Core)?;

    let source_branch = input.source_branch.as_deref().unwrap_or(DEFAULT_BRANCH);
    let target_branch = input.target_branch.as_deref().unwrap_or(DEFAULT_BRANCH);

    if input.source_recipe_id == input.target_recipe_id && source_branch == target_branch {
        return Err(AppError::Core(CoreError::Validation(
            "Source and target must differ".into(),
        )));
    }

    ensure_recipe(&state.pool, input.source_recipe_id).await?;
    ensure_recipe(&state.pool, input.target_recipe_id).await?;
    ensure_branch(&state.pool, input.source_recipe_id, source_branch).await?;
    ensure_branch(&state.pool, input.target_recipe_id, target_branch).await?;

    let mr = MergeRequestRepo::open(&state.pool, user.user_id, &input, source_branch, target_branch)
        .await?;

    tracing::info!(
        user_id = user.user_id,
        merge_request_id = mr.id,
        source_recipe_id = mr.source_recipe_id,
        target_recipe_id = mr.target_recipe_id,
        "Merge request opened"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: mr })))
}

/// GET /merge-requests/{id}
pub async fn get_merge_request(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mr = MergeRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "merge request",
            id,
        }))?;
    Ok(Json(DataResponse { data: mr }))
}

/// GET /recipes/{id}/merge-requests
///
/// Merge requests targeting a recipe, optionally filtered by state.
pub async fn list_merge_requests(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ListMergeRequestsParams>,
) -> AppResult<impl IntoResponse> {
    ensure_recipe(&state.pool, id).await?;

    let filter = match params.state.as_deref() {
        Some(raw) => Some(MergeRequestState::parse(raw).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Unknown merge request state '{raw}'"
            )))
        })?),
        None => None,
    };

    let requests = MergeRequestRepo::list_by_target(&state.pool, id, filter).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// PUT /merge-requests/{id}/state
///
/// Transition a merge request out of `open`. Only the target recipe's
/// owner or the user who opened it may transition.
pub async fn transition_merge_request(
    user: RequestUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TransitionMergeRequest>,
) -> AppResult<impl IntoResponse> {
    let mr = MergeRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "merge request",
            id,
        }))?;

    let target = ensure_recipe(&state.pool, mr.target_recipe_id).await?;
    if user.user_id != target.owner_id && user.user_id != mr.opened_by {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the target owner or the opener may transition this merge request".into(),
        )));
    }

    let updated = MergeRequestRepo::transition(&state.pool, id, input.state)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "merge request",
            id,
        }))?;

    tracing::info!(
        user_id = user.user_id,
        merge_request_id = id,
        state = %updated.state,
        "Merge request transitioned"
    );

    Ok(Json(DataResponse { data: updated }))
}
