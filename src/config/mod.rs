//! Configuration management for the scorekeeper service
//!
//! This module handles configuration loading from environment variables and
//! optional TOML files, validation, and default values.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings, StorageSettings};
pub use rating::RatingConfig;
