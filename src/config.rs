//! Configuration management for the Eat Rate Love client
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{EatRateLoveError, Result};
use crate::pagination::PageSize;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Where the session token and preferences are persisted
    #[serde(default)]
    pub storage: StorageConfig,
    /// Default page sizes for the interactive views
    #[serde(default)]
    pub ui: UiConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Persisted state configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Token backend: "file", "keyring" or "memory"
    #[serde(default = "default_storage_backend")]
    pub backend: String,

    /// Directory for the local storage files. Defaults to the platform data
    /// directory when unset.
    #[serde(default)]
    pub path: Option<String>,
}

fn default_storage_backend() -> String {
    "file".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            path: None,
        }
    }
}

/// View defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Initial restaurant search page size
    #[serde(default)]
    pub search_limit: PageSize,

    /// Initial review list page size
    #[serde(default)]
    pub reviews_limit: PageSize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            search_limit: PageSize::default(),
            reviews_limit: PageSize::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, apply environment and CLI overrides
    ///
    /// A missing file is not an error: defaults are used and a warning is
    /// logged.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    /// Parse a YAML configuration file
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            EatRateLoveError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("EATRATELOVE_API_BASE") {
            self.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("EATRATELOVE_TIMEOUT_SECONDS") {
            match timeout.parse() {
                Ok(value) => self.api.timeout_seconds = value,
                Err(_) => tracing::warn!(
                    "Ignoring invalid EATRATELOVE_TIMEOUT_SECONDS value: {}",
                    timeout
                ),
            }
        }

        if let Ok(backend) = std::env::var("EATRATELOVE_STORAGE_BACKEND") {
            self.storage.backend = backend;
        }

        if let Ok(dir) = std::env::var("EATRATELOVE_STORAGE_DIR") {
            self.storage.path = Some(dir);
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(base_url) = &cli.api_base {
            tracing::debug!("Using API base override: {}", base_url);
            self.api.base_url = base_url.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            return Err(EatRateLoveError::Config("api.base_url cannot be empty".to_string()).into());
        }

        let parsed = url::Url::parse(&self.api.base_url).map_err(|e| {
            EatRateLoveError::Config(format!(
                "Invalid api.base_url {}: {}",
                self.api.base_url, e
            ))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(EatRateLoveError::Config(format!(
                "api.base_url must use http or https, got {}",
                parsed.scheme()
            ))
            .into());
        }

        if self.api.timeout_seconds == 0 {
            return Err(EatRateLoveError::Config(
                "api.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        let valid_backends = ["file", "keyring", "memory"];
        if !valid_backends.contains(&self.storage.backend.as_str()) {
            return Err(EatRateLoveError::Config(format!(
                "Invalid storage backend: {}. Must be one of: {}",
                self.storage.backend,
                valid_backends.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
