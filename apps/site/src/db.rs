use std::path::Path;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::{Config, SeedRule};
use crate::seed::{seed_defaults, SeedReport};

/// Table definitions, applied on every start. `order` is quoted because it is a keyword.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS sections (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        "order"    INTEGER NOT NULL,
        title      TEXT    NOT NULL,
        content    TEXT    NOT NULL DEFAULT '',
        updated_at TEXT    NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS settings (
        key        TEXT PRIMARY KEY NOT NULL,
        value      TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS resume_sections (
        id      INTEGER PRIMARY KEY AUTOINCREMENT,
        title   TEXT    NOT NULL,
        "order" INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS resume_paragraphs (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        section_id INTEGER NOT NULL REFERENCES resume_sections(id) ON DELETE CASCADE,
        title      TEXT    NOT NULL,
        "order"    INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS resume_fields (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        paragraph_id INTEGER NOT NULL REFERENCES resume_paragraphs(id) ON DELETE CASCADE,
        label        TEXT    NOT NULL,
        value        TEXT    NOT NULL DEFAULT '',
        "order"      INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS navigation_links (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        label    TEXT    NOT NULL,
        icon     TEXT    NOT NULL DEFAULT '',
        endpoint TEXT    NOT NULL,
        "order"  INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS language_options (
        id      INTEGER PRIMARY KEY AUTOINCREMENT,
        code    TEXT    NOT NULL UNIQUE,
        name    TEXT    NOT NULL,
        "order" INTEGER NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_resume_paragraphs_section ON resume_paragraphs(section_id)",
    "CREATE INDEX IF NOT EXISTS idx_resume_fields_paragraph ON resume_fields(paragraph_id)",
];

/// Creates a SQLite connection pool for the database file, creating the file if needed.
pub async fn create_pool(database_path: &Path) -> Result<SqlitePool> {
    info!("Opening SQLite database at {}", database_path.display());

    let options = SqliteConnectOptions::new()
        .filename(database_path)
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to open database {}", database_path.display()))?;

    info!("SQLite connection pool established");
    Ok(pool)
}

/// Applies the schema. Safe to run against an existing database.
pub async fn apply_schema(pool: &SqlitePool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("Failed to apply database schema")?;
    }
    Ok(())
}

/// Takes the one row a `RETURNING` write produced.
///
/// Writes are drained with `fetch_all` rather than `fetch_one` so the statement has run
/// to completion, and its autocommit has landed, before the row is handed back.
pub fn single_row<T>(mut rows: Vec<T>) -> Result<T, sqlx::Error> {
    rows.pop().ok_or(sqlx::Error::RowNotFound)
}

/// Startup sequence for persistence: ensure the instance directory, open the pool,
/// apply the schema and run the seed check.
///
/// Under [`SeedRule::DatabaseFile`] the seed runs only if the database file was absent
/// before this call.
pub async fn open_database(config: &Config) -> Result<(SqlitePool, SeedReport)> {
    tokio::fs::create_dir_all(&config.instance_path)
        .await
        .with_context(|| {
            format!(
                "Failed to create instance directory {}",
                config.instance_path.display()
            )
        })?;

    let database_path = config.database_path();
    let fresh = !tokio::fs::try_exists(&database_path)
        .await
        .with_context(|| format!("Failed to check database file {}", database_path.display()))?;

    let pool = create_pool(&database_path).await?;
    apply_schema(&pool).await?;

    let report = match (config.seed_rule, fresh) {
        (SeedRule::DatabaseFile, false) => {
            info!("Existing database found, skipping seed");
            SeedReport::default()
        }
        (rule, _) => seed_defaults(&pool, rule).await?,
    };

    Ok((pool, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::count_rows;

    #[tokio::test]
    async fn test_fresh_instance_is_created_and_seeded() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path().join("nested").join("instance"));

        let (pool, report) = open_database(&config).await.unwrap();

        assert!(config.database_path().exists());
        assert_eq!(report.sections, 9);
        assert_eq!(report.nav_links, 5);
        assert_eq!(report.languages, 3);
        assert_eq!(count_rows(&pool, "sections").await, 9);
        pool.close().await;
    }

    #[tokio::test]
    async fn test_restart_performs_no_inserts() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path());

        let (pool, _) = open_database(&config).await.unwrap();
        pool.close().await;

        let (pool, report) = open_database(&config).await.unwrap();
        assert_eq!(report, SeedReport::default());
        assert_eq!(count_rows(&pool, "sections").await, 9);
        assert_eq!(count_rows(&pool, "navigation_links").await, 5);
        assert_eq!(count_rows(&pool, "language_options").await, 3);
        pool.close().await;
    }

    #[tokio::test]
    async fn test_emptied_table_not_reseeded_under_file_rule() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path());

        let (pool, _) = open_database(&config).await.unwrap();
        sqlx::query("DELETE FROM sections").execute(&pool).await.unwrap();
        pool.close().await;

        let (pool, report) = open_database(&config).await.unwrap();
        assert_eq!(report.sections, 0);
        assert_eq!(count_rows(&pool, "sections").await, 0);
        pool.close().await;
    }

    #[tokio::test]
    async fn test_emptied_table_reseeded_under_row_count_rule() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new(dir.path());
        config.seed_rule = SeedRule::RowCount;

        let (pool, _) = open_database(&config).await.unwrap();
        sqlx::query("DELETE FROM language_options")
            .execute(&pool)
            .await
            .unwrap();
        pool.close().await;

        let (pool, report) = open_database(&config).await.unwrap();
        assert_eq!(report.sections, 0);
        assert_eq!(report.nav_links, 0);
        assert_eq!(report.languages, 3);
        pool.close().await;
    }

    #[tokio::test]
    async fn test_unreadable_instance_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();

        let err = open_database(&Config::new(blocker.join("instance")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to create instance directory"));
    }

    #[test]
    fn test_single_row() {
        assert_eq!(single_row(vec![7]).unwrap(), 7);
        assert!(matches!(
            single_row(Vec::<i64>::new()),
            Err(sqlx::Error::RowNotFound)
        ));
    }
}
