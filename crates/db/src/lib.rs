//! MySQL persistence for Escola records.
//!
//! The pool is created once at startup with [`create_pool`] and handed to
//! each repository constructor; it is closed by the binary on shutdown.

use sqlx::mysql::MySqlPoolOptions;

pub mod config;
pub mod models;
pub mod repositories;

pub use config::DbConfig;

pub type DbPool = sqlx::MySqlPool;

/// Create a connection pool from database configuration.
///
/// Acquires beyond `max_connections` wait in the pool's queue.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options()?)
        .await
}

/// Round-trip a trivial query to verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
