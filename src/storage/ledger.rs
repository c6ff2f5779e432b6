//! Match ledger interface and implementations
//!
//! The ledger is an append-only list of committed match records, oldest
//! first. Records are never mutated or deleted once appended.

use crate::error::{Result, ScorekeeperError};
use crate::types::MatchRecord;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;

/// Append-only record of completed games
#[async_trait]
pub trait MatchLedger: Send + Sync {
    /// Append a committed record
    async fn append(&self, record: MatchRecord) -> Result<()>;

    /// All records in insertion order, oldest first
    async fn get_all(&self) -> Result<Vec<MatchRecord>>;

    /// The most recent `limit` records, newest first
    async fn recent(&self, limit: usize) -> Result<Vec<MatchRecord>> {
        let mut records = self.get_all().await?;
        let start = records.len().saturating_sub(limit);
        let mut tail = records.split_off(start);
        tail.reverse();
        Ok(tail)
    }
}

/// In-memory match ledger
#[derive(Debug, Default)]
pub struct InMemoryMatchLedger {
    records: RwLock<Vec<MatchRecord>>,
}

impl InMemoryMatchLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MatchLedger for InMemoryMatchLedger {
    async fn append(&self, record: MatchRecord) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| ScorekeeperError::StorageUnavailable {
                message: "Failed to acquire ledger write lock".to_string(),
            })?;

        records.push(record);
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<MatchRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| ScorekeeperError::StorageUnavailable {
                message: "Failed to acquire ledger read lock".to_string(),
            })?;

        Ok(records.clone())
    }
}

/// Match ledger backed by a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileMatchLedger {
    path: PathBuf,
}

impl JsonFileMatchLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_records(&self) -> Result<Vec<MatchRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
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

    fn write_records(&self, records: &[MatchRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records).map_err(|e| {
            ScorekeeperError::StorageUnavailable {
                message: format!("Failed to serialize match records: {}", e),
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
impl MatchLedger for JsonFileMatchLedger {
    async fn append(&self, record: MatchRecord) -> Result<()> {
        let mut records = self.read_records()?;
        records.push(record);
        self.write_records(&records)
    }

    async fn get_all(&self) -> Result<Vec<MatchRecord>> {
        self.read_records()
    }
}

/// Mock match ledger for testing
///
/// Counts append attempts and supports failure injection and artificial
/// latency, which drive the partial-commit tests.
#[derive(Debug, Default)]
pub struct MockMatchLedger {
    records: RwLock<Vec<MatchRecord>>,
    append_attempts: AtomicU64,
    fail_appends: AtomicBool,
    delay_ms: AtomicU64,
}

impl MockMatchLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `append` calls fail
    pub fn set_fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    /// Delay every call by the given number of milliseconds
    pub fn set_delay_ms(&self, delay_ms: u64) {
        self.delay_ms.store(delay_ms, Ordering::SeqCst);
    }

    /// Number of append calls made, including failed ones
    pub fn append_attempts(&self) -> u64 {
        self.append_attempts.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        }
    }
}

#[async_trait]
impl MatchLedger for MockMatchLedger {
    async fn append(&self, record: MatchRecord) -> Result<()> {
        self.simulate_latency().await;
        self.append_attempts.fetch_add(1, Ordering::SeqCst);

        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(ScorekeeperError::StorageUnavailable {
                message: "Injected ledger append failure".to_string(),
            }
            .into());
        }

        let mut records = self
            .records
            .write()
            .map_err(|_| ScorekeeperError::StorageUnavailable {
                message: "Failed to acquire ledger write lock".to_string(),
            })?;

        records.push(record);
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<MatchRecord>> {
        self.simulate_latency().await;

        let records = self
            .records
            .read()
            .map_err(|_| ScorekeeperError::StorageUnavailable {
                message: "Failed to acquire ledger read lock".to_string(),
            })?;

        Ok(records.clone())
    }
}
