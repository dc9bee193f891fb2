use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NavigationLinkRow {
    pub id: i64,
    pub label: String,
    pub icon: String,
    pub endpoint: String,
    pub order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LanguageOptionRow {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub order: i64,
}
