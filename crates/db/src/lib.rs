//! Forkful persistence layer.
//!
//! PostgreSQL access via sqlx: row models and DTOs under [`models`],
//! zero-sized repository structs under [`repositories`]. Multi-step
//! write paths (recipe seeding, commits, forks, merge-request
//! transitions) run as single transactions inside repository methods;
//! the database is the sole synchronization point.

pub mod error;
pub mod models;
pub mod repositories;

pub use error::DbError;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Alias for the shared connection pool type.
pub type DbPool = PgPool;

/// Create a connection pool for the given database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Cheap connectivity probe used by the health endpoint.
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
