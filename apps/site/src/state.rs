use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::i18n::{AcceptLanguageResolver, LocaleResolver};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
    /// Pluggable locale resolver. Default: AcceptLanguageResolver over `config.languages`.
    pub locale: Arc<dyn LocaleResolver>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: Config) -> Self {
        let locale = Arc::new(AcceptLanguageResolver::new(config.languages.clone()));
        Self { db, config, locale }
    }
}
