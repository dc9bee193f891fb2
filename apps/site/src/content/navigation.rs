use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::info;

use crate::content::ordering::order_or_next;
use crate::content::validation::{normalize_language_code, require_text};
use crate::db::single_row;
use crate::errors::AppError;
use crate::models::site::{LanguageOptionRow, NavigationLinkRow};
use crate::routes::endpoints::{endpoint_names, endpoint_path};

#[derive(Debug, Deserialize)]
pub struct NewNavigationLink {
    pub label: String,
    #[serde(default)]
    pub icon: String,
    pub endpoint: String,
    pub order: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NavigationLinkUpdate {
    pub label: Option<String>,
    pub icon: Option<String>,
    pub endpoint: Option<String>,
    pub order: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct NewLanguageOption {
    pub code: String,
    pub name: String,
    pub order: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LanguageOptionUpdate {
    pub code: Option<String>,
    pub name: Option<String>,
    pub order: Option<i64>,
}

fn check_endpoint(endpoint: &str) -> Result<String, AppError> {
    let endpoint = endpoint.trim();
    if endpoint_path(endpoint).is_none() {
        let known: Vec<&str> = endpoint_names().collect();
        return Err(AppError::Validation(format!(
            "Unknown endpoint '{endpoint}'. Expected one of: {}",
            known.join(", ")
        )));
    }
    Ok(endpoint.to_string())
}

// ── Navigation links ────────────────────────────────────────────────────────

/// Navigation links by rank, re-read on every call.
pub async fn list_nav_links(pool: &SqlitePool) -> Result<Vec<NavigationLinkRow>, AppError> {
    Ok(sqlx::query_as::<_, NavigationLinkRow>(
        r#"SELECT * FROM navigation_links ORDER BY "order", id"#,
    )
    .fetch_all(pool)
    .await?)
}

async fn get_nav_link(pool: &SqlitePool, id: i64) -> Result<NavigationLinkRow, AppError> {
    sqlx::query_as::<_, NavigationLinkRow>("SELECT * FROM navigation_links WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Navigation link {id} not found")))
}

pub async fn create_nav_link(
    pool: &SqlitePool,
    new: NewNavigationLink,
) -> Result<NavigationLinkRow, AppError> {
    let label = require_text("label", &new.label)?;
    let endpoint = check_endpoint(&new.endpoint)?;
    let order = order_or_next(pool, new.order, "navigation_links", None).await?;

    let row = sqlx::query_as::<_, NavigationLinkRow>(
        r#"
        INSERT INTO navigation_links (label, icon, endpoint, "order")
        VALUES (?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&label)
    .bind(new.icon.trim())
    .bind(&endpoint)
    .bind(order)
    .fetch_all(pool)
    .await
    .and_then(single_row)?;

    info!("Created navigation link {} -> {}", row.label, row.endpoint);
    Ok(row)
}

pub async fn update_nav_link(
    pool: &SqlitePool,
    id: i64,
    update: NavigationLinkUpdate,
) -> Result<NavigationLinkRow, AppError> {
    let existing = get_nav_link(pool, id).await?;
    let label = match update.label {
        Some(label) => require_text("label", &label)?,
        None => existing.label,
    };
    let endpoint = match update.endpoint {
        Some(endpoint) => check_endpoint(&endpoint)?,
        None => existing.endpoint,
    };
    let icon = update
        .icon
        .map(|i| i.trim().to_string())
        .unwrap_or(existing.icon);

    Ok(sqlx::query_as::<_, NavigationLinkRow>(
        r#"
        UPDATE navigation_links
        SET label = ?, icon = ?, endpoint = ?, "order" = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&label)
    .bind(&icon)
    .bind(&endpoint)
    .bind(update.order.unwrap_or(existing.order))
    .bind(id)
    .fetch_all(pool)
    .await
    .and_then(single_row)?)
}

pub async fn delete_nav_link(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM navigation_links WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Navigation link {id} not found")));
    }
    Ok(())
}

// ── Language options ────────────────────────────────────────────────────────

/// Language options by rank, re-read on every call.
pub async fn list_languages(pool: &SqlitePool) -> Result<Vec<LanguageOptionRow>, AppError> {
    Ok(sqlx::query_as::<_, LanguageOptionRow>(
        r#"SELECT * FROM language_options ORDER BY "order", id"#,
    )
    .fetch_all(pool)
    .await?)
}

async fn get_language(pool: &SqlitePool, id: i64) -> Result<LanguageOptionRow, AppError> {
    sqlx::query_as::<_, LanguageOptionRow>("SELECT * FROM language_options WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Language option {id} not found")))
}

pub async fn create_language(
    pool: &SqlitePool,
    new: NewLanguageOption,
) -> Result<LanguageOptionRow, AppError> {
    let code = normalize_language_code(&new.code)?;
    let name = require_text("name", &new.name)?;
    let order = order_or_next(pool, new.order, "language_options", None).await?;

    let row = sqlx::query_as::<_, LanguageOptionRow>(
        r#"INSERT INTO language_options (code, name, "order") VALUES (?, ?, ?) RETURNING *"#,
    )
    .bind(&code)
    .bind(&name)
    .bind(order)
    .fetch_all(pool)
    .await
    .and_then(single_row)
    .map_err(|e| AppError::from_write(e, format!("Language '{code}' already exists")))?;

    info!("Created language option {} ({})", row.code, row.name);
    Ok(row)
}

pub async fn update_language(
    pool: &SqlitePool,
    id: i64,
    update: LanguageOptionUpdate,
) -> Result<LanguageOptionRow, AppError> {
    let existing = get_language(pool, id).await?;
    let code = match update.code {
        Some(code) => normalize_language_code(&code)?,
        None => existing.code,
    };
    let name = match update.name {
        Some(name) => require_text("name", &name)?,
        None => existing.name,
    };

    sqlx::query_as::<_, LanguageOptionRow>(
        r#"UPDATE language_options SET code = ?, name = ?, "order" = ? WHERE id = ? RETURNING *"#,
    )
    .bind(&code)
    .bind(&name)
    .bind(update.order.unwrap_or(existing.order))
    .bind(id)
    .fetch_all(pool)
    .await
    .and_then(single_row)
    .map_err(|e| AppError::from_write(e, format!("Language '{code}' already exists")))
}

pub async fn delete_language(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM language_options WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Language option {id} not found")));
    }
    Ok(())
}
