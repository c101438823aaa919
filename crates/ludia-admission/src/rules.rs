//! Admission rule configuration.

use std::collections::BTreeSet;

use ludia_core::{constants, Config};

/// Immutable validation rules for a deployment. Built once at startup from
/// [`Config`] (or the canonical defaults) and shared read-only after that.
#[derive(Debug, Clone)]
pub struct ValidationRules {
    allowed_extensions: BTreeSet<String>,
    max_size_bytes: u64,
    entry_extension: String,
}

impl ValidationRules {
    /// Build rules from explicit parts. Extensions are normalized to
    /// lower-case with a leading dot, so membership checks are
    /// case-insensitive by construction.
    pub fn new<I, S>(allowed_extensions: I, max_size_bytes: u64, entry_extension: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| normalize_extension(e.as_ref()))
                .collect(),
            max_size_bytes,
            entry_extension: normalize_extension(entry_extension),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.allowed_extensions,
            config.max_file_size_bytes,
            &config.entry_extension,
        )
    }

    /// Is a (derived, normalized) extension in the allow-list?
    pub fn is_allowed(&self, extension: &str) -> bool {
        self.allowed_extensions.contains(&extension.to_lowercase())
    }

    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_bytes
    }

    pub fn entry_extension(&self) -> &str {
        &self.entry_extension
    }

    pub fn allowed_extensions(&self) -> impl Iterator<Item = &str> {
        self.allowed_extensions.iter().map(|s| s.as_str())
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self::new(
            constants::DEFAULT_ALLOWED_EXTENSIONS.iter().copied(),
            constants::DEFAULT_MAX_FILE_SIZE_BYTES,
            constants::DEFAULT_ENTRY_EXTENSION,
        )
    }
}

fn normalize_extension(ext: &str) -> String {
    let lower = ext.trim().to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{}", lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_canonical_rule_set() {
        let rules = ValidationRules::default();
        assert!(rules.is_allowed(".html"));
        assert!(rules.is_allowed(".ogg"));
        assert!(!rules.is_allowed(".exe"));
        assert_eq!(rules.max_size_bytes(), 10 * 1024 * 1024);
        assert_eq!(rules.entry_extension(), ".html");
    }

    #[test]
    fn test_extension_normalization() {
        let rules = ValidationRules::new(["HTML", ".Css"], 1024, "html");
        assert!(rules.is_allowed(".html"));
        assert!(rules.is_allowed(".HTML"));
        assert!(rules.is_allowed(".css"));
        assert_eq!(rules.entry_extension(), ".html");
    }

    #[test]
    fn test_from_config() {
        let rules = ValidationRules::from_config(&Config::default());
        assert!(rules.is_allowed(".json"));
        assert_eq!(rules.entry_extension(), ".html");
    }
}
