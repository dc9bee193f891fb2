//! Shared fixtures for database-backed tests.

use sqlx::SqlitePool;
use tempfile::TempDir;

use crate::config::Config;
use crate::db::{apply_schema, create_pool, open_database};
use crate::state::AppState;

/// A schema-only database in a fresh temp dir. Keep the `TempDir` alive for the test.
pub async fn empty_pool() -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let pool = create_pool(&dir.path().join("test.db"))
        .await
        .expect("open test database");
    apply_schema(&pool).await.expect("apply schema");
    (dir, pool)
}

/// A fully started application state over a freshly seeded database.
pub async fn seeded_state() -> (TempDir, AppState) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = Config::new(dir.path());
    let (db, _) = open_database(&config).await.expect("open seeded database");
    let state = AppState::new(db, config);
    (dir, state)
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("count rows")
}
