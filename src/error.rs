//! Error types for the scorekeeper service
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating and recording scenarios
#[derive(Debug, thiserror::Error)]
pub enum ScorekeeperError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Player on both teams: {player_id}")]
    RosterConflict { player_id: String },

    #[error("Duplicate player: {player_id}")]
    DuplicatePlayer { player_id: String },

    #[error("Storage unavailable: {message}")]
    StorageUnavailable { message: String },

    #[error("Storage operation '{operation}' timed out after {timeout_ms}ms")]
    StorageTimeout { operation: String, timeout_ms: u64 },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
