//! Route definitions for merge requests.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::merge_request;
use crate::state::AppState;

/// Routes mounted at `/merge-requests`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(merge_request::open_merge_request))
        .route("/{id}", get(merge_request::get_merge_request))
        .route("/{id}/state", put(merge_request::transition_merge_request))
}
