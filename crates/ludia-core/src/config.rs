//! Configuration module
//!
//! Environment-driven configuration for the catalog and the upload admission
//! rules. Every knob has a default so a bare process starts with the
//! canonical rule set; `validate()` catches inconsistent overrides early.

use std::env;

use anyhow::{Context, Result};

use crate::constants;

/// Application configuration. Loaded once at startup, never mutated.
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    /// Base URL the storage backend issues public file URLs under.
    pub storage_base_url: String,
    /// Per-file size ceiling for uploaded bundle files.
    pub max_file_size_bytes: u64,
    /// Allowed bundle file extensions (lower-case, leading dot).
    pub allowed_extensions: Vec<String>,
    /// Extension of the required entry-point file (the file the player loads).
    pub entry_extension: String,
    /// How many games the featured strip shows.
    pub featured_count: usize,
    /// Catalog page size.
    pub games_per_page: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            storage_base_url: constants::DEFAULT_STORAGE_BASE_URL.to_string(),
            max_file_size_bytes: constants::DEFAULT_MAX_FILE_SIZE_BYTES,
            allowed_extensions: constants::DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            entry_extension: constants::DEFAULT_ENTRY_EXTENSION.to_string(),
            featured_count: constants::DEFAULT_FEATURED_COUNT,
            games_per_page: constants::DEFAULT_GAMES_PER_PAGE,
        }
    }
}

impl Config {
    /// Load configuration from the environment (and a `.env` file if present).
    pub fn from_env() -> Result<Self> {
        // Best effort; a missing .env file is not an error.
        let _ = dotenvy::dotenv();

        let defaults = Config::default();

        let config = Config {
            environment: env_or("LUDIA_ENVIRONMENT", &defaults.environment),
            storage_base_url: env_or("LUDIA_STORAGE_BASE_URL", &defaults.storage_base_url),
            max_file_size_bytes: env_parse("LUDIA_MAX_FILE_SIZE_BYTES")?
                .unwrap_or(defaults.max_file_size_bytes),
            allowed_extensions: env_list("LUDIA_ALLOWED_EXTENSIONS")
                .unwrap_or(defaults.allowed_extensions),
            entry_extension: env_or("LUDIA_ENTRY_EXTENSION", &defaults.entry_extension),
            featured_count: env_parse("LUDIA_FEATURED_COUNT")?.unwrap_or(defaults.featured_count),
            games_per_page: env_parse("LUDIA_GAMES_PER_PAGE")?.unwrap_or(defaults.games_per_page),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Validate the loaded configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_file_size_bytes == 0 {
            anyhow::bail!("LUDIA_MAX_FILE_SIZE_BYTES must be positive");
        }
        if self.allowed_extensions.is_empty() {
            anyhow::bail!("LUDIA_ALLOWED_EXTENSIONS must not be empty");
        }
        for ext in &self.allowed_extensions {
            if !ext.starts_with('.') || ext.len() < 2 {
                anyhow::bail!(
                    "Allowed extension '{}' is invalid; extensions are lower-case with a leading dot",
                    ext
                );
            }
        }
        let entry = self.entry_extension.to_lowercase();
        if !self
            .allowed_extensions
            .iter()
            .any(|e| e.to_lowercase() == entry)
        {
            anyhow::bail!(
                "Entry extension '{}' is not in the allowed extension list",
                self.entry_extension
            );
        }
        if self.featured_count == 0 || self.games_per_page == 0 {
            anyhow::bail!("LUDIA_FEATURED_COUNT and LUDIA_GAMES_PER_PAGE must be positive");
        }
        Ok(())
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => {
            let parsed = raw
                .parse::<T>()
                .with_context(|| format!("Failed to parse {}='{}'", key, raw))?;
            Ok(Some(parsed))
        }
        Err(_) => Ok(None),
    }
}

/// Comma-separated list env var; entries are trimmed and lower-cased.
fn env_list(key: &str) -> Option<Vec<String>> {
    env::var(key).ok().map(|raw| {
        raw.split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_file_size_bytes, 10 * 1024 * 1024);
        assert!(config.allowed_extensions.contains(&".html".to_string()));
        assert_eq!(config.entry_extension, ".html");
        assert!(!config.is_production());
    }

    #[test]
    fn test_validate_rejects_zero_size_ceiling() {
        let config = Config {
            max_file_size_bytes: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_entry_outside_allow_list() {
        let config = Config {
            entry_extension: ".exe".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_extension_without_dot() {
        let config = Config {
            allowed_extensions: vec!["html".to_string()],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_is_production() {
        let config = Config {
            environment: "PRODUCTION".to_string(),
            ..Config::default()
        };
        assert!(config.is_production());
    }
}
