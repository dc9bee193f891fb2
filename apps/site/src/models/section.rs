use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SectionRow {
    pub id: i64,
    pub order: i64,
    pub title: String,
    pub content: String,
    pub updated_at: NaiveDateTime,
}
