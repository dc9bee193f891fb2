use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::info;

use crate::content::ordering::order_or_next;
use crate::content::validation::require_text;
use crate::db::single_row;
use crate::errors::AppError;
use crate::models::section::SectionRow;

#[derive(Debug, Deserialize)]
pub struct NewSection {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub order: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SectionUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub order: Option<i64>,
}

/// All sections by rank; ties keep insertion order.
pub async fn list_sections(pool: &SqlitePool) -> Result<Vec<SectionRow>, AppError> {
    Ok(
        sqlx::query_as::<_, SectionRow>(r#"SELECT * FROM sections ORDER BY "order", id"#)
            .fetch_all(pool)
            .await?,
    )
}

pub async fn get_section(pool: &SqlitePool, id: i64) -> Result<SectionRow, AppError> {
    sqlx::query_as::<_, SectionRow>("SELECT * FROM sections WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Section {id} not found")))
}

pub async fn create_section(pool: &SqlitePool, new: NewSection) -> Result<SectionRow, AppError> {
    let title = require_text("title", &new.title)?;
    let order = order_or_next(pool, new.order, "sections", None).await?;

    let row = sqlx::query_as::<_, SectionRow>(
        r#"INSERT INTO sections ("order", title, content) VALUES (?, ?, ?) RETURNING *"#,
    )
    .bind(order)
    .bind(&title)
    .bind(&new.content)
    .fetch_all(pool)
    .await
    .and_then(single_row)?;

    info!("Created section {} '{}'", row.id, row.title);
    Ok(row)
}

pub async fn update_section(
    pool: &SqlitePool,
    id: i64,
    update: SectionUpdate,
) -> Result<SectionRow, AppError> {
    let existing = get_section(pool, id).await?;
    let title = match update.title {
        Some(title) => require_text("title", &title)?,
        None => existing.title,
    };
    let content = update.content.unwrap_or(existing.content);
    let order = update.order.unwrap_or(existing.order);

    Ok(sqlx::query_as::<_, SectionRow>(
        r#"
        UPDATE sections
        SET title = ?, content = ?, "order" = ?, updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&title)
    .bind(&content)
    .bind(order)
    .bind(id)
    .fetch_all(pool)
    .await
    .and_then(single_row)?)
}

pub async fn delete_section(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM sections WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Section {id} not found")));
    }
    info!("Deleted section {id}");
    Ok(())
}

/// Assigns ranks 1..n following the position of each id in `ids`.
/// Sections not listed keep their rank. Any unknown id aborts the whole reorder.
pub async fn reorder_sections(pool: &SqlitePool, ids: &[i64]) -> Result<Vec<SectionRow>, AppError> {
    let mut tx = pool.begin().await?;
    for (position, id) in ids.iter().enumerate() {
        let result = sqlx::query(r#"UPDATE sections SET "order" = ? WHERE id = ?"#)
            .bind(position as i64 + 1)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Section {id} not found")));
        }
    }
    tx.commit().await?;
    list_sections(pool).await
}
