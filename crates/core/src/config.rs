//! Portal configuration
//!
//! TOML configuration controlling filter translation, language resolution,
//! the organisation-list cache, and hidden filters applied to every backend
//! query:
//!
//! ```toml
//! date_range_field = "search_daterange_mv"
//! languages = ["fi", "sv", "en"]
//! default_language = "fi"
//! cache_max_age_minutes = 60
//! hidden_filters = ["online_boolean:\"1\""]
//! ```
//!
//! Every field has a default; an absent file means default behavior, and an
//! absent `date_range_field` silently disables date-range detection.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {}", msg),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err.to_string())
    }
}

/// Portal configuration with defaults for every field
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PortalConfig {
    /// The single field treated as a date-range filter; unset disables
    /// detection
    pub date_range_field: Option<String>,
    /// Explicit display language, overriding the UI locale
    pub language: Option<String>,
    /// Languages the portal serves
    pub languages: Vec<String>,
    /// Fallback when the resolved language is not in `languages`
    pub default_language: String,
    /// Directory for the organisation-list cache files; unset resolves to
    /// the platform cache directory
    pub cache_dir: Option<PathBuf>,
    /// Organisation-list cache TTL
    pub cache_max_age_minutes: u64,
    /// Filter expressions applied to every backend query
    pub hidden_filters: Vec<String>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            date_range_field: None,
            language: None,
            languages: vec!["fi".to_string(), "sv".to_string(), "en".to_string()],
            default_language: "fi".to_string(),
            cache_dir: None,
            cache_max_age_minutes: 60,
            hidden_filters: Vec::new(),
        }
    }
}

impl PortalConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|err| ConfigError::ParseError(err.to_string()))
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Cache TTL as a duration
    pub fn cache_max_age(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.cache_max_age_minutes * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = PortalConfig::default();
        assert_eq!(config.date_range_field, None);
        assert_eq!(config.languages, vec!["fi", "sv", "en"]);
        assert_eq!(config.default_language, "fi");
        assert_eq!(config.cache_max_age_minutes, 60);
        assert!(config.hidden_filters.is_empty());
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config = PortalConfig::from_toml_str("").unwrap();
        assert_eq!(config, PortalConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = PortalConfig::from_toml_str(
            r#"
            date_range_field = "search_daterange_mv"
            cache_max_age_minutes = 15
            "#,
        )
        .unwrap();

        assert_eq!(
            config.date_range_field,
            Some("search_daterange_mv".to_string())
        );
        assert_eq!(config.cache_max_age_minutes, 15);
        assert_eq!(config.default_language, "fi");
    }

    #[test]
    fn test_full_toml() {
        let config = PortalConfig::from_toml_str(
            r#"
            date_range_field = "search_daterange_mv"
            language = "sv"
            languages = ["fi", "sv"]
            default_language = "sv"
            cache_dir = "/var/cache/opactools"
            cache_max_age_minutes = 1440
            hidden_filters = ["online_boolean:\"1\"", "-merged_child_boolean:true"]
            "#,
        )
        .unwrap();

        assert_eq!(config.language, Some("sv".to_string()));
        assert_eq!(config.cache_dir, Some(PathBuf::from("/var/cache/opactools")));
        assert_eq!(config.hidden_filters.len(), 2);
        assert_eq!(config.cache_max_age().as_secs(), 1440 * 60);
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let result = PortalConfig::from_toml_str("languages = 3");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("opactools.toml");
        fs::write(&path, "default_language = \"en\"").unwrap();

        let config = PortalConfig::load(&path).unwrap();
        assert_eq!(config.default_language, "en");
    }

    #[test]
    fn test_load_missing_file_is_an_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = PortalConfig::load(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
