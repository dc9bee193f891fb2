use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeSectionRow {
    pub id: i64,
    pub title: String,
    pub order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeParagraphRow {
    pub id: i64,
    pub section_id: i64,
    pub title: String,
    pub order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeFieldRow {
    pub id: i64,
    pub paragraph_id: i64,
    pub label: String,
    pub value: String,
    pub order: i64,
}
