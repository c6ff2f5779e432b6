//! Rating store interface and implementations
//!
//! This module defines the interface for persisting and retrieving player
//! ratings, with in-memory, JSON-file, and mock implementations.

use crate::error::{Result, ScorekeeperError};
use crate::types::PlayerId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};

/// Key-value persistence of player -> rating
///
/// The durable rating of record lives behind this trait; the core only ever
/// reads a snapshot at the start of an evaluation and writes the updated
/// mapping back after a commit.
#[async_trait]
pub trait RatingStore: Send + Sync {
    /// All stored ratings
    async fn get_all(&self) -> Result<HashMap<PlayerId, f64>>;

    /// Upsert every entry in the mapping
    ///
    /// After a successful call every key in `ratings` exists with the given
    /// value; keys not named are left alone.
    async fn put_all(&self, ratings: HashMap<PlayerId, f64>) -> Result<()>;

    /// Remove a player's rating; returns whether it existed
    async fn remove(&self, player_id: &str) -> Result<bool>;
}

/// In-memory rating store
#[derive(Debug, Default)]
pub struct InMemoryRatingStore {
    ratings: RwLock<HashMap<PlayerId, f64>>,
}

impl InMemoryRatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given ratings
    pub fn with_ratings(ratings: HashMap<PlayerId, f64>) -> Self {
        Self {
            ratings: RwLock::new(ratings),
        }
    }
}

#[async_trait]
impl RatingStore for InMemoryRatingStore {
    async fn get_all(&self) -> Result<HashMap<PlayerId, f64>> {
        let ratings = self
            .ratings
            .read()
            .map_err(|_| ScorekeeperError::StorageUnavailable {
                message: "Failed to acquire ratings read lock".to_string(),
            })?;

        Ok(ratings.clone())
    }

    async fn put_all(&self, new_ratings: HashMap<PlayerId, f64>) -> Result<()> {
        let mut ratings = self
            .ratings
            .write()
            .map_err(|_| ScorekeeperError::StorageUnavailable {
                message: "Failed to acquire ratings write lock".to_string(),
            })?;

        ratings.extend(new_ratings);
        Ok(())
    }

    async fn remove(&self, player_id: &str) -> Result<bool> {
        let mut ratings = self
            .ratings
            .write()
            .map_err(|_| ScorekeeperError::StorageUnavailable {
                message: "Failed to acquire ratings write lock".to_string(),
            })?;

        Ok(ratings.remove(player_id).is_some())
    }
}

/// Rating store backed by a single JSON file
///
/// Each write rewrites the whole file, mirroring the clear-and-rewrite
/// semantics of the original storage backend.
#[derive(Debug, Clone)]
pub struct JsonFileRatingStore {
    path: PathBuf,
}

impl JsonFileRatingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<HashMap<PlayerId, f64>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            ScorekeeperError::StorageUnavailable {
                message: format!("Failed to read {}: {}", self.path.display(), e),
            }
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            ScorekeeperError::StorageUnavailable {
                message: format!("Failed to parse {}: {}", self.path.display(), e),
            }
            .into()
        })
    }

    fn write_map(&self, ratings: &HashMap<PlayerId, f64>) -> Result<()> {
        let json = serde_json::to_string_pretty(ratings).map_err(|e| {
            ScorekeeperError::StorageUnavailable {
                message: format!("Failed to serialize ratings: {}", e),
            }
        })?;

        std::fs::write(&self.path, json).map_err(|e| {
            ScorekeeperError::StorageUnavailable {
                message: format!("Failed to write {}: {}", self.path.display(), e),
            }
            .into()
        })
    }
}

#[async_trait]
impl RatingStore for JsonFileRatingStore {
    async fn get_all(&self) -> Result<HashMap<PlayerId, f64>> {
        self.read_map()
    }

    async fn put_all(&self, new_ratings: HashMap<PlayerId, f64>) -> Result<()> {
        let mut ratings = self.read_map()?;
        ratings.extend(new_ratings);
        self.write_map(&ratings)
    }

    async fn remove(&self, player_id: &str) -> Result<bool> {
        let mut ratings = self.read_map()?;
        let existed = ratings.remove(player_id).is_some();
        if existed {
            self.write_map(&ratings)?;
        }
        Ok(existed)
    }
}

/// Mock rating store for testing
///
/// Records every `put_all` call and supports failure injection and
/// artificial latency for timeout tests.
#[derive(Debug, Default)]
pub struct MockRatingStore {
    ratings: RwLock<HashMap<PlayerId, f64>>,
    put_calls: Mutex<Vec<HashMap<PlayerId, f64>>>,
    fail_gets: AtomicBool,
    fail_puts: AtomicBool,
    delay_ms: AtomicU64,
}

impl MockRatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset stored ratings for testing
    pub fn preset(&self, ratings: HashMap<PlayerId, f64>) {
        if let Ok(mut stored) = self.ratings.write() {
            *stored = ratings;
        }
    }

    /// Make subsequent `get_all` calls fail
    pub fn set_fail_gets(&self, fail: bool) {
        self.fail_gets.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `put_all` calls fail
    pub fn set_fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// Delay every call by the given number of milliseconds
    pub fn set_delay_ms(&self, delay_ms: u64) {
        self.delay_ms.store(delay_ms, Ordering::SeqCst);
    }

    /// All `put_all` calls made so far
    pub fn put_calls(&self) -> Vec<HashMap<PlayerId, f64>> {
        self.put_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    async fn simulate_latency(&self) {
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        }
    }
}

#[async_trait]
impl RatingStore for MockRatingStore {
    async fn get_all(&self) -> Result<HashMap<PlayerId, f64>> {
        self.simulate_latency().await;

        if self.fail_gets.load(Ordering::SeqCst) {
            return Err(ScorekeeperError::StorageUnavailable {
                message: "Injected rating store read failure".to_string(),
            }
            .into());
        }

        let ratings = self
            .ratings
            .read()
            .map_err(|_| ScorekeeperError::StorageUnavailable {
                message: "Failed to acquire ratings read lock".to_string(),
            })?;

        Ok(ratings.clone())
    }

    async fn put_all(&self, new_ratings: HashMap<PlayerId, f64>) -> Result<()> {
        self.simulate_latency().await;

        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(ScorekeeperError::StorageUnavailable {
                message: "Injected rating store write failure".to_string(),
            }
            .into());
        }

        if let Ok(mut calls) = self.put_calls.lock() {
            calls.push(new_ratings.clone());
        }

        let mut ratings = self
            .ratings
            .write()
            .map_err(|_| ScorekeeperError::StorageUnavailable {
                message: "Failed to acquire ratings write lock".to_string(),
            })?;

        ratings.extend(new_ratings);
        Ok(())
    }

    async fn remove(&self, player_id: &str) -> Result<bool> {
        self.simulate_latency().await;

        let mut ratings = self
            .ratings
            .write()
            .map_err(|_| ScorekeeperError::StorageUnavailable {
                message: "Failed to acquire ratings write lock".to_string(),
            })?;

        Ok(ratings.remove(player_id).is_some())
    }
}
