use std::collections::BTreeMap;

use sqlx::SqlitePool;
use tracing::info;

use crate::content::validation::validate_setting_key;
use crate::errors::AppError;
use crate::models::setting::SettingRow;

pub async fn list_settings(pool: &SqlitePool) -> Result<Vec<SettingRow>, AppError> {
    Ok(
        sqlx::query_as::<_, SettingRow>("SELECT * FROM settings ORDER BY key")
            .fetch_all(pool)
            .await?,
    )
}

/// Settings as a key → value map, the shape templates consume.
pub async fn settings_map(pool: &SqlitePool) -> Result<BTreeMap<String, String>, AppError> {
    Ok(list_settings(pool)
        .await?
        .into_iter()
        .map(|s| (s.key, s.value))
        .collect())
}

/// Inserts or overwrites every entry of `values` atomically.
pub async fn upsert_settings(
    pool: &SqlitePool,
    values: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>, AppError> {
    for key in values.keys() {
        validate_setting_key(key)?;
    }

    let mut tx = pool.begin().await?;
    for (key, value) in values {
        sqlx::query(
            r#"
            INSERT INTO settings (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE
            SET value = excluded.value, updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    info!("Updated {} setting(s)", values.len());
    settings_map(pool).await
}

pub async fn delete_setting(pool: &SqlitePool, key: &str) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM settings WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Setting '{key}' not found")));
    }
    Ok(())
}
