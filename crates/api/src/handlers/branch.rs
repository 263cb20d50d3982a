//! Handlers for branch management.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use forkful_core::branching::{validate_branch_description, validate_branch_name};
use forkful_core::error::CoreError;
use forkful_core::types::DbId;
use forkful_db::models::branch::CreateBranch;
use forkful_db::repositories::{BranchRepo, ForkRepo, VersionRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{ensure_owner, ensure_recipe};
use crate::identity::RequestUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /recipes/{id}/branches
///
/// List active branches; the default branch is listed first.
pub async fn list_branches(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_recipe(&state.pool, id).await?;
    let branches = BranchRepo::list_by_recipe(&state.pool, id).await?;
    Ok(Json(DataResponse { data: branches }))
}

/// POST /recipes/{id}/branches
///
/// Create a branch. New branches are never default. The base version
/// defaults to the recipe's latest commit.
pub async fn create_branch(
    user: RequestUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateBranch>,
) -> AppResult<impl IntoResponse> {
    validate_branch_name(&input.name).map_err(AppError::Core)?;
    validate_branch_description(&input.description).map_err(AppError::Core)?;

    let recipe = ensure_recipe(&state.pool, id).await?;
    ensure_owner(&recipe, user.user_id)?;

    if BranchRepo::find_by_name(&state.pool, id, &input.name)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Branch name already exists".into(),
        )));
    }

    let base_version_id = match input.base_version_id {
        Some(version_id) => {
            if !VersionRepo::belongs_to_recipe(&state.pool, version_id, id).await? {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "Base version {version_id} does not belong to recipe {id}"
                ))));
            }
            Some(version_id)
        }
        None => VersionRepo::latest(&state.pool, id)
            .await?
            .map(|c| c.version_id),
    };

    let branch = BranchRepo::create(&state.pool, id, user.user_id, &input, base_version_id).await?;

    tracing::info!(
        user_id = user.user_id,
        recipe_id = id,
        branch_id = branch.id,
        branch_name = %branch.branch_name,
        "Branch created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: branch })))
}

/// PUT /recipes/{id}/branches/{branch_id}/set-default
///
/// Promote a branch to the default, demoting the previous one atomically.
pub async fn set_default(
    user: RequestUser,
    State(state): State<AppState>,
    Path((id, branch_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let recipe = ensure_recipe(&state.pool, id).await?;
    ensure_owner(&recipe, user.user_id)?;

    let branch = BranchRepo::set_default(&state.pool, id, branch_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "branch",
            id: branch_id,
        }))?;

    tracing::info!(
        user_id = user.user_id,
        recipe_id = id,
        branch_id,
        "Default branch changed"
    );

    Ok(Json(DataResponse { data: branch }))
}

/// DELETE /recipes/{id}/branches/{branch_id}
///
/// Soft-deactivate a branch. The default branch and branches referenced
/// by fork edges are refused.
pub async fn deactivate_branch(
    user: RequestUser,
    State(state): State<AppState>,
    Path((id, branch_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let recipe = ensure_recipe(&state.pool, id).await?;
    ensure_owner(&recipe, user.user_id)?;

    let branch = BranchRepo::find_by_id(&state.pool, branch_id)
        .await?
        .filter(|b| b.recipe_id == id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "branch",
            id: branch_id,
        }))?;

    if branch.is_default {
        return Err(AppError::Core(CoreError::Conflict(
            "The default branch cannot be deactivated".into(),
        )));
    }
    if ForkRepo::references_branch(&state.pool, id, &branch.branch_name).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Branch is referenced by a fork and cannot be deactivated".into(),
        )));
    }

    BranchRepo::deactivate(&state.pool, branch_id).await?;

    tracing::info!(
        user_id = user.user_id,
        recipe_id = id,
        branch_id,
        "Branch deactivated"
    );

    Ok(StatusCode::NO_CONTENT)
}
