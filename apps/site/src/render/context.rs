use serde::Serialize;
use sqlx::SqlitePool;

use crate::content::navigation::{list_languages, list_nav_links};
use crate::errors::AppError;
use crate::i18n::{Locale, LocaleResolver};
use crate::models::site::{LanguageOptionRow, NavigationLinkRow};
use crate::routes::endpoints::endpoint_path;

/// A navigation link with its endpoint resolved to a path.
#[derive(Debug, Clone, Serialize)]
pub struct NavLinkView {
    pub label: String,
    pub icon: String,
    pub endpoint: String,
    /// `None` when the stored endpoint name is not registered.
    pub href: Option<&'static str>,
    pub order: i64,
}

impl From<NavigationLinkRow> for NavLinkView {
    fn from(row: NavigationLinkRow) -> Self {
        NavLinkView {
            href: endpoint_path(&row.endpoint),
            label: row.label,
            icon: row.icon,
            endpoint: row.endpoint,
            order: row.order,
        }
    }
}

/// A language option as offered in the switcher. Only configured languages can be
/// selected; options for any other code are listed with `href: None`.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageView {
    pub code: String,
    pub name: String,
    pub order: i64,
    pub href: Option<String>,
}

impl LanguageView {
    fn new(row: LanguageOptionRow, resolver: &dyn LocaleResolver) -> Self {
        LanguageView {
            href: resolver
                .is_supported(&row.code)
                .then(|| format!("/lang/{}", row.code)),
            code: row.code,
            name: row.name,
            order: row.order,
        }
    }
}

/// Globals available to every rendered page.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext {
    pub locale: Locale,
    pub direction: &'static str,
    pub nav_links: Vec<NavLinkView>,
    pub langs: Vec<LanguageView>,
}

/// Reads navigation links and language options (both ascending by `order`) for one
/// render. Nothing is cached between requests.
pub async fn build_template_context(
    pool: &SqlitePool,
    resolver: &dyn LocaleResolver,
    locale: &Locale,
) -> Result<TemplateContext, AppError> {
    let nav_links = list_nav_links(pool)
        .await?
        .into_iter()
        .map(NavLinkView::from)
        .collect();
    let langs = list_languages(pool)
        .await?
        .into_iter()
        .map(|row| LanguageView::new(row, resolver))
        .collect();

    Ok(TemplateContext {
        locale: locale.clone(),
        direction: locale.direction(),
        nav_links,
        langs,
    })
}
