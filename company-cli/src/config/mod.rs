//! Application configuration
//!
//! Loaded from `~/.config/company-admin/config.toml` (or `--config`), with
//! `DATABASE_URL` from the environment or a `.env` file taking precedence
//! over the file value.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::auth::Actor;
use crate::import::summary::DEFAULT_ERROR_PREVIEW;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://company.db";

/// Top-level configuration file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database_url: String,
    pub actor: Actor,
    pub import: ImportConfig,
}

/// Settings for the hours import
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// How many row errors to show before collapsing into "(+N more)"
    pub error_preview: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            actor: Actor::default(),
            import: ImportConfig::default(),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            error_preview: DEFAULT_ERROR_PREVIEW,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Self::from_toml(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            log::debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };

        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.trim().is_empty() {
                config.database_url = url;
            }
        }

        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid configuration")
    }
}

/// `~/.config/company-admin/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("company-admin")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.actor.role, Role::Admin);
        assert_eq!(config.import.error_preview, 5);
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
            database_url = "sqlite:///tmp/company.db"

            [actor]
            username = "viewer1"
            role = "viewer"

            [import]
            error_preview = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.database_url, "sqlite:///tmp/company.db");
        assert_eq!(config.actor, Actor::new("viewer1", Role::Viewer));
        assert_eq!(config.import.error_preview, 10);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let result = Config::from_toml(
            r#"
            [actor]
            username = "x"
            role = "root"
            "#,
        );
        assert!(result.is_err());
    }
}
