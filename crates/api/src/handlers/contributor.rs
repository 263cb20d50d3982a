//! Handler for the contributor ledger listing.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use forkful_core::types::DbId;
use forkful_db::repositories::ContributorRepo;

use crate::error::AppResult;
use crate::handlers::ensure_recipe;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /recipes/{id}/contributors
///
/// Contributors with display identity, busiest first.
pub async fn list_contributors(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_recipe(&state.pool, id).await?;
    let contributors = ContributorRepo::list_by_recipe(&state.pool, id).await?;
    Ok(Json(DataResponse { data: contributors }))
}
