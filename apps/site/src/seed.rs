//! Default content inserted on first start.
//!
//! All three groups are written in a single transaction: either the whole seed
//! lands or none of it does.

use anyhow::{Context, Result};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};

use crate::config::SeedRule;

pub const DEFAULT_SECTIONS: [&str; 9] = [
    "Summary",
    "Career Objective",
    "Experience",
    "Qualifications",
    "Skills",
    "Languages",
    "Projects",
    "Links",
    "Interests",
];

pub struct DefaultNavLink {
    pub label: &'static str,
    pub icon: &'static str,
    pub endpoint: &'static str,
    pub order: i64,
}

pub const DEFAULT_NAV_LINKS: [DefaultNavLink; 5] = [
    DefaultNavLink { label: "Home", icon: "🏠", endpoint: "main.home", order: 1 },
    DefaultNavLink { label: "Sections", icon: "📝", endpoint: "admin.manage_sections", order: 2 },
    DefaultNavLink { label: "Settings", icon: "🎨", endpoint: "admin.manage_settings", order: 3 },
    DefaultNavLink { label: "Resume", icon: "📄", endpoint: "public.resume", order: 4 },
    DefaultNavLink { label: "Builder", icon: "🧱", endpoint: "admin.resume_builder", order: 5 },
];

/// (code, display name, order)
pub const DEFAULT_LANGUAGES: [(&str, &str, i64); 3] =
    [("ar", "Arabic", 1), ("en", "English", 2), ("de", "German", 3)];

/// Rows inserted per table by one seed run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub sections: u64,
    pub nav_links: u64,
    pub languages: u64,
}

impl SeedReport {
    pub fn total(&self) -> u64 {
        self.sections + self.nav_links + self.languages
    }
}

/// Inserts the default rows.
///
/// Under [`SeedRule::DatabaseFile`] the caller has already established that the
/// database is new, so sections go in unconditionally while navigation links and
/// languages keep their own empty-table guard. Under [`SeedRule::RowCount`] every
/// table is guarded by its row count.
pub async fn seed_defaults(pool: &SqlitePool, rule: SeedRule) -> Result<SeedReport> {
    let mut tx = pool.begin().await.context("Failed to start seed transaction")?;

    let sections = if rule == SeedRule::DatabaseFile || table_is_empty(&mut tx, "sections").await? {
        insert_initial_sections(&mut tx).await?
    } else {
        0
    };
    let nav_links = if table_is_empty(&mut tx, "navigation_links").await? {
        insert_initial_navigation(&mut tx).await?
    } else {
        0
    };
    let languages = if table_is_empty(&mut tx, "language_options").await? {
        insert_initial_languages(&mut tx).await?
    } else {
        0
    };

    tx.commit().await.context("Failed to commit seed transaction")?;

    let report = SeedReport {
        sections,
        nav_links,
        languages,
    };
    info!(
        "Seed complete: {} sections, {} navigation links, {} languages",
        report.sections, report.nav_links, report.languages
    );
    Ok(report)
}

async fn table_is_empty(tx: &mut Transaction<'_, Sqlite>, table: &str) -> Result<bool> {
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(&mut **tx)
        .await
        .with_context(|| format!("Failed to count rows in {table}"))?;
    Ok(count == 0)
}

async fn insert_initial_sections(tx: &mut Transaction<'_, Sqlite>) -> Result<u64> {
    for (idx, title) in DEFAULT_SECTIONS.iter().enumerate() {
        debug!("Adding section: {title}");
        sqlx::query(r#"INSERT INTO sections ("order", title, content) VALUES (?, ?, '')"#)
            .bind(idx as i64 + 1)
            .bind(*title)
            .execute(&mut **tx)
            .await
            .with_context(|| format!("Failed to insert section '{title}'"))?;
    }
    info!("Sections inserted.");
    Ok(DEFAULT_SECTIONS.len() as u64)
}

async fn insert_initial_navigation(tx: &mut Transaction<'_, Sqlite>) -> Result<u64> {
    for link in &DEFAULT_NAV_LINKS {
        sqlx::query(
            r#"INSERT INTO navigation_links (label, icon, endpoint, "order") VALUES (?, ?, ?, ?)"#,
        )
        .bind(link.label)
        .bind(link.icon)
        .bind(link.endpoint)
        .bind(link.order)
        .execute(&mut **tx)
        .await
        .with_context(|| format!("Failed to insert navigation link '{}'", link.label))?;
    }
    info!("Navigation links inserted.");
    Ok(DEFAULT_NAV_LINKS.len() as u64)
}

async fn insert_initial_languages(tx: &mut Transaction<'_, Sqlite>) -> Result<u64> {
    for (code, name, order) in DEFAULT_LANGUAGES {
        sqlx::query(r#"INSERT INTO language_options (code, name, "order") VALUES (?, ?, ?)"#)
            .bind(code)
            .bind(name)
            .bind(order)
            .execute(&mut **tx)
            .await
            .with_context(|| format!("Failed to insert language '{code}'"))?;
    }
    info!("Languages inserted.");
    Ok(DEFAULT_LANGUAGES.len() as u64)
}
