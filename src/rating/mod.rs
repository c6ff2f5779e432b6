//! Team-averaged Elo rating engine
//!
//! This module provides the pure rating calculations and the per-commit
//! snapshot of stored ratings the calculations read from.

pub mod engine;
pub mod snapshot;

// Re-export commonly used items
pub use engine::{expected_score, team_update};
pub use snapshot::RatingSnapshot;
