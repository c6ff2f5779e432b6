//! Main application configuration
//!
//! This module defines the primary configuration structures for the
//! scorekeeper service, including environment variable loading, optional
//! TOML file loading, and validation.

use crate::config::rating::RatingConfig;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub storage: StorageSettings,
    pub rating: RatingConfig,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Storage backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Path of the JSON rating store
    pub ratings_path: PathBuf,
    /// Path of the JSON match ledger
    pub ledger_path: PathBuf,
    /// Bound on every rating store / match ledger call, in milliseconds
    pub operation_timeout_ms: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "scorekeeper".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            ratings_path: PathBuf::from("ratings.json"),
            ledger_path: PathBuf::from("matches.json"),
            operation_timeout_ms: 5_000,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }

        // Storage settings
        if let Ok(path) = env::var("RATINGS_PATH") {
            config.storage.ratings_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("LEDGER_PATH") {
            config.storage.ledger_path = PathBuf::from(path);
        }
        if let Ok(timeout) = env::var("STORAGE_TIMEOUT_MS") {
            config.storage.operation_timeout_ms = timeout
                .parse()
                .map_err(|_| anyhow!("Invalid STORAGE_TIMEOUT_MS value: {}", timeout))?;
        }

        // Rating settings
        if let Ok(baseline) = env::var("BASELINE_RATING") {
            config.rating.baseline_rating = baseline
                .parse()
                .map_err(|_| anyhow!("Invalid BASELINE_RATING value: {}", baseline))?;
        }
        if let Ok(k) = env::var("DEFAULT_K_FACTOR") {
            config.rating.default_k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid DEFAULT_K_FACTOR value: {}", k))?;
        }
        if let Ok(size) = env::var("MIN_TEAM_SIZE") {
            config.rating.min_team_size = size
                .parse()
                .map_err(|_| anyhow!("Invalid MIN_TEAM_SIZE value: {}", size))?;
        }
        if let Ok(size) = env::var("MAX_TEAM_SIZE") {
            config.rating.max_team_size = size
                .parse()
                .map_err(|_| anyhow!("Invalid MAX_TEAM_SIZE value: {}", size))?;
        }

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))?;
        Ok(config)
    }
}

/// Validate a complete application configuration
pub fn validate_config(config: &AppConfig) -> Result<()> {
    config.rating.validate()?;

    if config.storage.operation_timeout_ms == 0 {
        return Err(anyhow!("Storage operation timeout must be positive"));
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name must not be empty"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.service.name, "scorekeeper");
        assert_eq!(config.storage.operation_timeout_ms, 5_000);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = AppConfig::default();
        config.storage.operation_timeout_ms = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_parse_toml_overrides() {
        let toml = r#"
            [service]
            log_level = "debug"

            [storage]
            ratings_path = "/tmp/scores.json"
            operation_timeout_ms = 250

            [rating]
            default_k_factor = 24.0
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.service.log_level, "debug");
        assert_eq!(config.storage.ratings_path, PathBuf::from("/tmp/scores.json"));
        assert_eq!(config.storage.operation_timeout_ms, 250);
        assert_eq!(config.rating.default_k_factor, 24.0);
        // Untouched sections keep their defaults
        assert_eq!(config.rating.baseline_rating, 1200.0);
        assert_eq!(config.storage.ledger_path, PathBuf::from("matches.json"));
    }
}
