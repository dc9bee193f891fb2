//! Resume builder: sections own paragraphs, paragraphs own fields.
//!
//! Children are removed by `ON DELETE CASCADE`; nothing here deletes them by hand.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::info;

use crate::content::ordering::order_or_next;
use crate::content::validation::require_text;
use crate::db::single_row;
use crate::errors::AppError;
use crate::models::resume::{ResumeFieldRow, ResumeParagraphRow, ResumeSectionRow};

#[derive(Debug, Clone, Serialize)]
pub struct ResumeSectionNode {
    #[serde(flatten)]
    pub section: ResumeSectionRow,
    pub paragraphs: Vec<ResumeParagraphNode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeParagraphNode {
    #[serde(flatten)]
    pub paragraph: ResumeParagraphRow,
    pub fields: Vec<ResumeFieldRow>,
}

#[derive(Debug, Deserialize)]
pub struct NewTitled {
    pub title: String,
    pub order: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TitledUpdate {
    pub title: Option<String>,
    pub order: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct NewField {
    pub label: String,
    #[serde(default)]
    pub value: String,
    pub order: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FieldUpdate {
    pub label: Option<String>,
    pub value: Option<String>,
    pub order: Option<i64>,
}

/// Builds the nested tree from flat rows. Each level is sorted by `order`, then `id`.
/// Rows whose parent is missing are dropped.
pub fn assemble_tree(
    mut sections: Vec<ResumeSectionRow>,
    mut paragraphs: Vec<ResumeParagraphRow>,
    mut fields: Vec<ResumeFieldRow>,
) -> Vec<ResumeSectionNode> {
    sections.sort_by_key(|s| (s.order, s.id));
    paragraphs.sort_by_key(|p| (p.order, p.id));
    fields.sort_by_key(|f| (f.order, f.id));

    let mut fields_by_paragraph: HashMap<i64, Vec<ResumeFieldRow>> = HashMap::new();
    for field in fields {
        fields_by_paragraph
            .entry(field.paragraph_id)
            .or_default()
            .push(field);
    }

    let mut paragraphs_by_section: HashMap<i64, Vec<ResumeParagraphNode>> = HashMap::new();
    for paragraph in paragraphs {
        let fields = fields_by_paragraph.remove(&paragraph.id).unwrap_or_default();
        paragraphs_by_section
            .entry(paragraph.section_id)
            .or_default()
            .push(ResumeParagraphNode { paragraph, fields });
    }

    sections
        .into_iter()
        .map(|section| ResumeSectionNode {
            paragraphs: paragraphs_by_section.remove(&section.id).unwrap_or_default(),
            section,
        })
        .collect()
}

/// Loads the full resume tree.
pub async fn load_tree(pool: &SqlitePool) -> Result<Vec<ResumeSectionNode>, AppError> {
    let sections = sqlx::query_as::<_, ResumeSectionRow>("SELECT * FROM resume_sections")
        .fetch_all(pool)
        .await?;
    let paragraphs = sqlx::query_as::<_, ResumeParagraphRow>("SELECT * FROM resume_paragraphs")
        .fetch_all(pool)
        .await?;
    let fields = sqlx::query_as::<_, ResumeFieldRow>("SELECT * FROM resume_fields")
        .fetch_all(pool)
        .await?;
    Ok(assemble_tree(sections, paragraphs, fields))
}

// ── Sections ────────────────────────────────────────────────────────────────

async fn get_resume_section(pool: &SqlitePool, id: i64) -> Result<ResumeSectionRow, AppError> {
    sqlx::query_as::<_, ResumeSectionRow>("SELECT * FROM resume_sections WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume section {id} not found")))
}

pub async fn create_resume_section(
    pool: &SqlitePool,
    new: NewTitled,
) -> Result<ResumeSectionRow, AppError> {
    let title = require_text("title", &new.title)?;
    let order = order_or_next(pool, new.order, "resume_sections", None).await?;
    let row = sqlx::query_as::<_, ResumeSectionRow>(
        r#"INSERT INTO resume_sections (title, "order") VALUES (?, ?) RETURNING *"#,
    )
    .bind(&title)
    .bind(order)
    .fetch_all(pool)
    .await
    .and_then(single_row)?;
    info!("Created resume section {} '{}'", row.id, row.title);
    Ok(row)
}

pub async fn update_resume_section(
    pool: &SqlitePool,
    id: i64,
    update: TitledUpdate,
) -> Result<ResumeSectionRow, AppError> {
    let existing = get_resume_section(pool, id).await?;
    let title = match update.title {
        Some(title) => require_text("title", &title)?,
        None => existing.title,
    };
    Ok(sqlx::query_as::<_, ResumeSectionRow>(
        r#"UPDATE resume_sections SET title = ?, "order" = ? WHERE id = ? RETURNING *"#,
    )
    .bind(&title)
    .bind(update.order.unwrap_or(existing.order))
    .bind(id)
    .fetch_all(pool)
    .await
    .and_then(single_row)?)
}

pub async fn delete_resume_section(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    delete_by_id(pool, "resume_sections", id, "Resume section").await
}

// ── Paragraphs ──────────────────────────────────────────────────────────────

async fn get_paragraph(pool: &SqlitePool, id: i64) -> Result<ResumeParagraphRow, AppError> {
    sqlx::query_as::<_, ResumeParagraphRow>("SELECT * FROM resume_paragraphs WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Paragraph {id} not found")))
}

pub async fn create_paragraph(
    pool: &SqlitePool,
    section_id: i64,
    new: NewTitled,
) -> Result<ResumeParagraphRow, AppError> {
    get_resume_section(pool, section_id).await?;
    let title = require_text("title", &new.title)?;
    let order = order_or_next(
        pool,
        new.order,
        "resume_paragraphs",
        Some(("section_id", section_id)),
    )
    .await?;
    Ok(sqlx::query_as::<_, ResumeParagraphRow>(
        r#"INSERT INTO resume_paragraphs (section_id, title, "order") VALUES (?, ?, ?) RETURNING *"#,
    )
    .bind(section_id)
    .bind(&title)
    .bind(order)
    .fetch_all(pool)
    .await
    .and_then(single_row)?)
}

pub async fn update_paragraph(
    pool: &SqlitePool,
    id: i64,
    update: TitledUpdate,
) -> Result<ResumeParagraphRow, AppError> {
    let existing = get_paragraph(pool, id).await?;
    let title = match update.title {
        Some(title) => require_text("title", &title)?,
        None => existing.title,
    };
    Ok(sqlx::query_as::<_, ResumeParagraphRow>(
        r#"UPDATE resume_paragraphs SET title = ?, "order" = ? WHERE id = ? RETURNING *"#,
    )
    .bind(&title)
    .bind(update.order.unwrap_or(existing.order))
    .bind(id)
    .fetch_all(pool)
    .await
    .and_then(single_row)?)
}

pub async fn delete_paragraph(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    delete_by_id(pool, "resume_paragraphs", id, "Paragraph").await
}

// ── Fields ──────────────────────────────────────────────────────────────────

async fn get_field(pool: &SqlitePool, id: i64) -> Result<ResumeFieldRow, AppError> {
    sqlx::query_as::<_, ResumeFieldRow>("SELECT * FROM resume_fields WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Field {id} not found")))
}

pub async fn create_field(
    pool: &SqlitePool,
    paragraph_id: i64,
    new: NewField,
) -> Result<ResumeFieldRow, AppError> {
    get_paragraph(pool, paragraph_id).await?;
    let label = require_text("label", &new.label)?;
    let order = order_or_next(
        pool,
        new.order,
        "resume_fields",
        Some(("paragraph_id", paragraph_id)),
    )
    .await?;
    Ok(sqlx::query_as::<_, ResumeFieldRow>(
        r#"INSERT INTO resume_fields (paragraph_id, label, value, "order") VALUES (?, ?, ?, ?) RETURNING *"#,
    )
    .bind(paragraph_id)
    .bind(&label)
    .bind(&new.value)
    .bind(order)
    .fetch_all(pool)
    .await
    .and_then(single_row)?)
}

pub async fn update_field(
    pool: &SqlitePool,
    id: i64,
    update: FieldUpdate,
) -> Result<ResumeFieldRow, AppError> {
    let existing = get_field(pool, id).await?;
    let label = match update.label {
        Some(label) => require_text("label", &label)?,
        None => existing.label,
    };
    Ok(sqlx::query_as::<_, ResumeFieldRow>(
        r#"UPDATE resume_fields SET label = ?, value = ?, "order" = ? WHERE id = ? RETURNING *"#,
    )
    .bind(&label)
    .bind(update.value.unwrap_or(existing.value))
    .bind(update.order.unwrap_or(existing.order))
    .bind(id)
    .fetch_all(pool)
    .await
    .and_then(single_row)?)
}

pub async fn delete_field(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    delete_by_id(pool, "resume_fields", id, "Field").await
}

async fn delete_by_id(
    pool: &SqlitePool,
    table: &'static str,
    id: i64,
    what: &str,
) -> Result<(), AppError> {
    let result = sqlx::query(&format!("DELETE FROM {table} WHERE id = ?"))
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("{what} {id} not found")));
    }
    info!("Deleted {what} {id}");
    Ok(())
}
