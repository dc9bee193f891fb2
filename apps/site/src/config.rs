use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// File name of the SQLite database inside the instance directory.
pub const DATABASE_FILE: &str = "lebenslauf.db";

/// Languages offered when `LANGUAGES` is not set. The first entry is the fallback locale.
pub const DEFAULT_LANGUAGES: &[&str] = &["de", "en", "ar"];

/// Decides when the default rows are inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedRule {
    /// Seed only when the database file did not exist before startup.
    DatabaseFile,
    /// Seed every table that is empty, on every startup.
    RowCount,
}

impl FromStr for SeedRule {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "database_file" | "file" => Ok(SeedRule::DatabaseFile),
            "row_count" | "rows" => Ok(SeedRule::RowCount),
            other => bail!("SEED_RULE must be 'database_file' or 'row_count', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub instance_path: PathBuf,
    pub languages: Vec<String>,
    pub translations_dir: PathBuf,
    pub seed_rule: SeedRule,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    /// Defaults for everything except the instance directory.
    pub fn new(instance_path: impl Into<PathBuf>) -> Self {
        Config {
            instance_path: instance_path.into(),
            languages: DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            translations_dir: default_translations_dir(),
            seed_rule: SeedRule::DatabaseFile,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }

    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let mut config = Config::new(env_or("INSTANCE_PATH", "instance"));

        if let Ok(raw) = std::env::var("LANGUAGES") {
            config.languages = parse_languages(&raw)?;
        }
        if let Ok(dir) = std::env::var("TRANSLATIONS_DIR") {
            config.translations_dir = PathBuf::from(dir);
        }
        if let Ok(rule) = std::env::var("SEED_RULE") {
            config.seed_rule = rule.parse()?;
        }
        config.port = env_or("PORT", "8080")
            .parse::<u16>()
            .context("PORT must be a valid port number")?;
        config.rust_log = env_or("RUST_LOG", "info");

        Ok(config)
    }

    pub fn database_path(&self) -> PathBuf {
        self.instance_path.join(DATABASE_FILE)
    }

    /// Locale used when a request expresses no supported preference.
    pub fn default_language(&self) -> &str {
        self.languages.first().map(String::as_str).unwrap_or("de")
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn default_translations_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("translations")
}

/// Parses a comma-separated language list, dropping blanks and duplicates.
pub fn parse_languages(raw: &str) -> Result<Vec<String>> {
    let mut languages: Vec<String> = Vec::new();
    for code in raw.split(',').map(|c| c.trim().to_ascii_lowercase()) {
        if !code.is_empty() && !languages.contains(&code) {
            languages.push(code);
        }
    }
    if languages.is_empty() {
        bail!("LANGUAGES must name at least one language code");
    }
    Ok(languages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_languages_keeps_order() {
        let langs = parse_languages(" de, EN ,ar,en").unwrap();
        assert_eq!(langs, vec!["de", "en", "ar"]);
    }

    #[test]
    fn test_parse_languages_rejects_empty() {
        assert!(parse_languages(" , ").is_err());
    }

    #[test]
    fn test_seed_rule_parse() {
        assert_eq!("row_count".parse::<SeedRule>().unwrap(), SeedRule::RowCount);
        assert_eq!(
            "Database_File".parse::<SeedRule>().unwrap(),
            SeedRule::DatabaseFile
        );
        assert!("sometimes".parse::<SeedRule>().is_err());
    }

    #[test]
    fn test_database_path_inside_instance() {
        let config = Config::new("/srv/site/instance");
        assert_eq!(
            config.database_path(),
            PathBuf::from("/srv/site/instance/lebenslauf.db")
        );
        assert_eq!(config.default_language(), "de");
    }
}
