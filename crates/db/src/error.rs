//! Error type for transactional repository operations.
//!
//! Plain CRUD methods return `sqlx::Error` directly. Operations that
//! enforce domain rules mid-transaction (commit, fork, merge-request
//! transitions) also need to surface [`CoreError`], so they return
//! [`DbError`] instead.

use forkful_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}
