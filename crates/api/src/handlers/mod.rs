//! HTTP handlers composing the core engines and the repository layer
//! into the engine's external operations.

pub mod branch;
pub mod contributor;
pub mod fork;
pub mod merge_request;
pub mod recipe;
pub mod stats;
pub mod version;

use forkful_core::error::CoreError;
use forkful_core::types::DbId;
use forkful_db::models::recipe::Recipe;
use forkful_db::repositories::RecipeRepo;

use crate::error::{AppError, AppResult};

/// Fetch a recipe by id or return 404.
pub(crate) async fn ensure_recipe(pool: &sqlx::PgPool, id: DbId) -> AppResult<Recipe> {
    RecipeRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "recipe",
            id,
        }))
}

/// Require that `user_id` owns the recipe.
pub(crate) fn ensure_owner(recipe: &Recipe, user_id: DbId) -> AppResult<()> {
    if recipe.owner_id != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the recipe owner may perform this action".into(),
        )));
    }
    Ok(())
}
