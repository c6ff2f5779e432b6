//! Scorekeeper - team Elo ratings for tabletop games
//!
//! This crate converts team-vs-team match results into per-player rating
//! deltas and records completed matches, with persistence behind a rating
//! store and an append-only match ledger.

pub mod config;
pub mod error;
pub mod metrics;
pub mod rating;
pub mod record;
pub mod roster;
pub mod storage;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Result, ScorekeeperError};
pub use types::*;

// Re-export key components
pub use record::MatchRecorder;
pub use roster::RosterManager;
pub use storage::{MatchLedger, RatingStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
