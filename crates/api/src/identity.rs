//! Identity extractor for Axum handlers.
//!
//! Authentication happens upstream: the gateway validates the session
//! and forwards the stable user id in the `x-user-id` header. The
//! engine stores and compares that identifier and never sees
//! credentials.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use forkful_core::error::CoreError;
use forkful_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// The requesting user, extracted from the `x-user-id` header.
///
/// Use this as an extractor parameter in any handler that attributes a
/// write to a user:
///
/// ```ignore
/// async fn my_handler(user: RequestUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequestUser {
    /// The user's internal database id.
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for RequestUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing x-user-id header".into()))
            })?;

        let user_id: DbId = header.parse().map_err(|_| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid x-user-id header; expected a numeric id".into(),
            ))
        })?;

        Ok(RequestUser { user_id })
    }
}
