pub mod health;
pub mod merge_request;
pub mod recipe;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /recipes                                   list, create
/// /recipes/{id}                              get, delete
/// /recipes/{id}/commit                       commit new content (POST)
/// /recipes/{id}/history                      commit history
/// /recipes/{id}/branches                     list, create
/// /recipes/{id}/branches/{bid}               deactivate (DELETE)
/// /recipes/{id}/branches/{bid}/set-default   promote (PUT)
/// /recipes/{id}/fork                         fork (POST)
/// /recipes/{id}/forks                        fork tree
/// /recipes/{id}/contributors                 contributor ledger
/// /recipes/{id}/stats                        repository stats
/// /recipes/{id}/compare/{other_id}           pairwise compare
/// /recipes/{id}/merge-requests               list for target recipe
///
/// /merge-requests                            open (POST)
/// /merge-requests/{id}                       get
/// /merge-requests/{id}/state                 transition (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/recipes", recipe::router())
        .nest("/merge-requests", merge_request::router())
}
