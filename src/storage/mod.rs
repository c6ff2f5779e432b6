//! Storage interfaces for ratings and the match ledger
//!
//! This module defines the two collaborator interfaces the core reads and
//! writes — key-value rating persistence and an append-only match ledger —
//! with in-memory, JSON-file, and mock implementations.

pub mod ledger;
pub mod rating_store;

// Re-export commonly used types
pub use ledger::{InMemoryMatchLedger, JsonFileMatchLedger, MatchLedger, MockMatchLedger};
pub use rating_store::{InMemoryRatingStore, JsonFileRatingStore, MockRatingStore, RatingStore};

use crate::error::{Result, ScorekeeperError};
use std::future::Future;
use std::time::Duration;

/// Bound a storage call, surfacing expiry as `StorageTimeout`
pub async fn with_timeout<T>(
    operation: &str,
    timeout_ms: u64,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(Duration::from_millis(timeout_ms), fut).await {
        Ok(result) => result,
        Err(_) => Err(ScorekeeperError::StorageTimeout {
            operation: operation.to_string(),
            timeout_ms,
        }
        .into()),
    }
}
