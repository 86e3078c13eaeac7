// src/config.rs

//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::SectionScheme;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Edition/section API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Search index connection settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Run behavior settings
    #[serde(default)]
    pub run: RunConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.editions_url.trim().is_empty() {
            return Err(AppError::validation("api.editions_url is empty"));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::validation("api.base_url is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.api.max_concurrent == 0 {
            return Err(AppError::validation("api.max_concurrent must be > 0"));
        }
        if self.api.retry_attempts == 0 {
            return Err(AppError::validation("api.retry_attempts must be > 0"));
        }
        if self.search.url.trim().is_empty() {
            return Err(AppError::validation("search.url is empty"));
        }
        if self.search.index_prefix.trim().is_empty() {
            return Err(AppError::validation("search.index_prefix is empty"));
        }
        Ok(())
    }
}

/// HTTP client behavior for the edition/section API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// URL listing the available editions
    #[serde(default = "defaults::editions_url")]
    pub editions_url: String,

    /// Base URL for section requests: `{base_url}/{scheme}/{number}/{edition}`
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between section requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Maximum concurrent section fetches per edition (1 = sequential)
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Attempts per section before logging a permanent failure
    #[serde(default = "defaults::retry_attempts")]
    pub retry_attempts: u32,

    /// Fixed delay between retry attempts in milliseconds
    #[serde(default = "defaults::retry_backoff")]
    pub retry_backoff_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            editions_url: defaults::editions_url(),
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
            max_concurrent: defaults::max_concurrent(),
            retry_attempts: defaults::retry_attempts(),
            retry_backoff_ms: defaults::retry_backoff(),
        }
    }
}

/// Search index connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the search cluster
    #[serde(default = "defaults::search_url")]
    pub url: String,

    /// Basic auth username (empty = no auth)
    #[serde(default)]
    pub username: String,

    /// Basic auth password
    #[serde(default)]
    pub password: String,

    /// Prefix for per-edition index names: `{prefix}{edition_identifier}`
    #[serde(default = "defaults::index_prefix")]
    pub index_prefix: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            url: defaults::search_url(),
            username: String::new(),
            password: String::new(),
            index_prefix: defaults::index_prefix(),
        }
    }
}

/// Run behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Section scheme used to paginate each edition
    #[serde(default)]
    pub scheme: SectionScheme,

    /// Path of the append-only failure log
    #[serde(default = "defaults::failure_log")]
    pub failure_log: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            scheme: SectionScheme::default(),
            failure_log: defaults::failure_log(),
        }
    }
}

/// Default values for configuration fields.
mod defaults {
    pub fn editions_url() -> String {
        "https://api.alquran.cloud/v1/edition?format=text&language=ar&type=quran".to_string()
    }

    pub fn base_url() -> String {
        "http://api.alquran.cloud/v1".to_string()
    }

    pub fn user_agent() -> String {
        format!("quran-indexer/{}", env!("CARGO_PKG_VERSION"))
    }

    pub fn timeout() -> u64 {
        30
    }

    pub fn request_delay() -> u64 {
        0
    }

    pub fn max_concurrent() -> usize {
        1
    }

    pub fn retry_attempts() -> u32 {
        3
    }

    pub fn retry_backoff() -> u64 {
        500
    }

    pub fn search_url() -> String {
        "http://localhost:9200".to_string()
    }

    pub fn index_prefix() -> String {
        "ayahs_in_".to_string()
    }

    pub fn failure_log() -> String {
        "failed_links.log".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.api.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_prefix() {
        let mut config = Config::default();
        config.search.index_prefix = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [search]
            url = "http://search.internal:9200"
            "#,
        )
        .unwrap();

        assert_eq!(config.search.url, "http://search.internal:9200");
        assert_eq!(config.search.index_prefix, "ayahs_in_");
        assert_eq!(config.api.retry_attempts, 3);
        assert_eq!(config.run.scheme, SectionScheme::Page);
    }
}
