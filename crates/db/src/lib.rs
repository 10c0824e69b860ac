//! PostgreSQL persistence for tasks and categories.
//!
//! The pool is created explicitly by the binary at startup and handed to
//! every repository call; nothing here holds global state.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;
pub mod seed;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Row totals reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct StoreCounts {
    pub tasks: i64,
    pub categories: i64,
}

pub async fn store_counts(pool: &DbPool) -> Result<StoreCounts, sqlx::Error> {
    sqlx::query_as::<_, StoreCounts>(
        "SELECT (SELECT COUNT(*) FROM tasks) AS tasks, \
                (SELECT COUNT(*) FROM categories) AS categories",
    )
    .fetch_one(pool)
    .await
}

/// Apply pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
