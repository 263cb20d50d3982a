//! Route definitions for recipes and their version-control sub-resources.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{branch, contributor, fork, merge_request, recipe, stats, version};
use crate::state::AppState;

/// Routes mounted at `/recipes`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(recipe::list_recipes).post(recipe::create_recipe))
        .route(
            "/{id}",
            get(recipe::get_recipe).delete(recipe::delete_recipe),
        )
        .route("/{id}/commit", post(version::commit))
        .route("/{id}/history", get(version::history))
        .route(
            "/{id}/branches",
            get(branch::list_branches).post(branch::create_branch),
        )
        .route("/{id}/branches/{branch_id}", delete(branch::deactivate_branch))
        .route(
            "/{id}/branches/{branch_id}/set-default",
            put(branch::set_default),
        )
        .route("/{id}/fork", post(fork::fork_recipe))
        .route("/{id}/forks", get(fork::fork_tree))
        .route("/{id}/contributors", get(contributor::list_contributors))
        .route("/{id}/stats", get(stats::get_stats))
        .route("/{id}/compare/{other_id}", get(stats::compare_recipes))
        .route(
            "/{id}/merge-requests",
            get(merge_request::list_merge_requests),
        )
}
