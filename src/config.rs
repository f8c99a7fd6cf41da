//! # Configuration Management Module
//!
//! ## Purpose
//! Centralized configuration management for the discovery search engine,
//! supporting TOML files and environment variable overrides with validation
//! and type-safe access to all settings.
//!
//! ## Input/Output Specification
//! - **Input**: Configuration files (TOML), environment variables
//! - **Output**: Validated configuration structs with defaults and overrides
//! - **Validation**: Type checking, range validation
//!
//! ## Configuration Sources (in order of precedence)
//! 1. Environment variables (prefix `DISCOVERY_SEARCH_`)
//! 2. Configuration file
//! 3. Default values

use crate::errors::{DiscoveryError, Result};
use crate::Locale;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure containing all system settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Local search behavior
    pub search: SearchConfig,
    /// Input debouncing
    pub debounce: DebounceConfig,
    /// Remote search collaborator
    pub remote: RemoteConfig,
    /// Document catalog source
    pub catalog: CatalogConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Local search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of results per query (top-K)
    pub max_results: usize,
    /// Maximum raw query length in characters; longer input triggers the
    /// degraded naive-match path
    pub max_query_length: usize,
}

/// Debounce configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Quiet period after the last input change before dispatching, in ms
    pub quiet_period_ms: u64,
}

impl DebounceConfig {
    /// Quiet period as a `Duration`
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }
}

/// Remote search collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Enable the remote search path
    pub enabled: bool,
    /// Search endpoint URL
    pub endpoint: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl RemoteConfig {
    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Document catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to the catalog JSON file
    pub path: PathBuf,
    /// Locale used when none is given on the command line
    pub default_locale: Locale,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable structured JSON logging
    pub json_format: bool,
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::from_file("config.toml")
    }

    /// Load configuration from a specific file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!("Configuration file not found: {:?}, using defaults", path);
            let mut config = Self::default();
            config.apply_env_overrides()?;
            config.validate()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path).map_err(|e| DiscoveryError::Config {
            message: format!("Failed to read config file {:?}: {}", path, e),
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|e| DiscoveryError::Config {
            message: format!("Failed to parse config file {:?}: {}", path, e),
        })?;

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(endpoint) = std::env::var("DISCOVERY_SEARCH_REMOTE_ENDPOINT") {
            self.remote.endpoint = endpoint;
        }
        if let Ok(catalog_path) = std::env::var("DISCOVERY_SEARCH_CATALOG_PATH") {
            self.catalog.path = PathBuf::from(catalog_path);
        }
        if let Ok(level) = std::env::var("DISCOVERY_SEARCH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(quiet) = std::env::var("DISCOVERY_SEARCH_DEBOUNCE_MS") {
            self.debounce.quiet_period_ms =
                quiet.parse().map_err(|_| DiscoveryError::Config {
                    message: "Invalid value in DISCOVERY_SEARCH_DEBOUNCE_MS".to_string(),
                })?;
        }
        Ok(())
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.search.max_results == 0 {
            return Err(DiscoveryError::ValidationFailed {
                field: "search.max_results".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.search.max_query_length == 0 {
            return Err(DiscoveryError::ValidationFailed {
                field: "search.max_query_length".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.debounce.quiet_period_ms == 0 {
            return Err(DiscoveryError::ValidationFailed {
                field: "debounce.quiet_period_ms".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.remote.enabled && self.remote.endpoint.is_empty() {
            return Err(DiscoveryError::ValidationFailed {
                field: "remote.endpoint".to_string(),
                reason: "endpoint required when remote search is enabled".to_string(),
            });
        }

        if self.remote.enabled && self.remote.timeout_ms == 0 {
            return Err(DiscoveryError::ValidationFailed {
                field: "remote.timeout_ms".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Get configuration as TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| DiscoveryError::Config {
            message: format!("Failed to serialize config to TOML: {}", e),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            debounce: DebounceConfig::default(),
            remote: RemoteConfig::default(),
            catalog: CatalogConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 10,
            max_query_length: 500,
        }
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            quiet_period_ms: 300,
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "http://127.0.0.1:8091/search".to_string(),
            timeout_ms: 5000,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/catalog.json"),
            default_locale: Locale::En,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}
