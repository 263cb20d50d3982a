//! Handlers for recipe CRUD.
//!
//! Creation seeds the full repository shape (version 1, default branch,
//! creator contributor); deletion cascades per the documented policy.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use forkful_core::error::CoreError;
use forkful_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use forkful_core::recipe::validate_content;
use forkful_core::snapshot::RecipeSnapshot;
use forkful_core::types::DbId;
use forkful_db::models::recipe::ListRecipesParams;
use forkful_db::repositories::RecipeRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{ensure_owner, ensure_recipe};
use crate::identity::RequestUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /recipes
///
/// List the requesting user's recipes, most recently updated first.
pub async fn list_recipes(
    user: RequestUser,
    State(state): State<AppState>,
    Query(params): Query<ListRecipesParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let recipes = RecipeRepo::list_by_owner(&state.pool, user.user_id, limit, offset).await?;
    Ok(Json(DataResponse { data: recipes }))
}

/// POST /recipes
///
/// Create a recipe from initial content.
pub async fn create_recipe(
    user: RequestUser,
    State(state): State<AppState>,
    Json(content): Json<RecipeSnapshot>,
) -> AppResult<impl IntoResponse> {
    validate_content(&content).map_err(AppError::Core)?;

    if RecipeRepo::title_exists(&state.pool, user.user_id, &content.title, None).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "A recipe with this title already exists".into(),
        )));
    }

    let recipe = RecipeRepo::create(&state.pool, user.user_id, &content).await?;

    tracing::info!(
        user_id = user.user_id,
        recipe_id = recipe.id,
        title = %recipe.title,
        "Recipe created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: recipe })))
}

/// GET /recipes/{id}
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let recipe = ensure_recipe(&state.pool, id).await?;
    Ok(Json(DataResponse { data: recipe }))
}

/// DELETE /recipes/{id}
///
/// Delete a recipe. Versions, branches, contributor rows, merge
/// requests, and fork edges cascade away; forked descendants survive
/// detached.
pub async fn delete_recipe(
    user: RequestUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let recipe = ensure_recipe(&state.pool, id).await?;
    ensure_owner(&recipe, user.user_id)?;

    RecipeRepo::delete(&state.pool, id).await?;

    tracing::info!(user_id = user.user_id, recipe_id = id, "Recipe deleted");

    Ok(StatusCode::NO_CONTENT)
}
