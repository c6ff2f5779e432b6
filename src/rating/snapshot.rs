//! Per-commit view of stored ratings
//!
//! A snapshot is fetched fresh from the rating store at the start of each
//! evaluation and dropped when it returns; there is no process-wide rating
//! cache. Unknown players read as the baseline rating.

use crate::storage::{with_timeout, RatingStore};
use crate::types::PlayerId;
use std::collections::HashMap;
use tracing::warn;

/// Immutable snapshot of player ratings with a baseline default
#[derive(Debug, Clone)]
pub struct RatingSnapshot {
    ratings: HashMap<PlayerId, f64>,
    baseline: f64,
}

impl RatingSnapshot {
    pub fn new(ratings: HashMap<PlayerId, f64>, baseline: f64) -> Self {
        Self { ratings, baseline }
    }

    /// Fetch a fresh snapshot from the store
    ///
    /// Fails soft: a store error or timeout degrades to an empty snapshot,
    /// so every player reads as baseline rather than the read hard-failing.
    pub async fn load(store: &dyn RatingStore, baseline: f64, timeout_ms: u64) -> Self {
        match with_timeout("rating_store.get_all", timeout_ms, store.get_all()).await {
            Ok(ratings) => Self::new(ratings, baseline),
            Err(e) => {
                warn!(
                    "Rating store read failed, treating all players as baseline: {}",
                    e
                );
                Self::new(HashMap::new(), baseline)
            }
        }
    }

    /// Current rating for a player; baseline when the player is unknown
    pub fn rating_of(&self, player_id: &str) -> f64 {
        self.ratings
            .get(player_id)
            .copied()
            .unwrap_or(self.baseline)
    }

    /// Ratings for a whole roster, in roster order
    pub fn ratings_for(&self, roster: &[PlayerId]) -> Vec<f64> {
        roster.iter().map(|p| self.rating_of(p)).collect()
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MockRatingStore;

    #[test]
    fn test_unknown_player_reads_baseline() {
        let mut ratings = HashMap::new();
        ratings.insert("alice".to_string(), 1350.0);
        let snapshot = RatingSnapshot::new(ratings, 1200.0);

        assert_eq!(snapshot.rating_of("alice"), 1350.0);
        assert_eq!(snapshot.rating_of("nobody"), 1200.0);
    }

    #[test]
    fn test_roster_ratings_keep_order() {
        let mut ratings = HashMap::new();
        ratings.insert("a".to_string(), 1400.0);
        ratings.insert("b".to_string(), 1000.0);
        let snapshot = RatingSnapshot::new(ratings, 1200.0);

        let roster = vec!["a".to_string(), "x".to_string(), "b".to_string()];
        assert_eq!(snapshot.ratings_for(&roster), vec![1400.0, 1200.0, 1000.0]);
    }

    #[tokio::test]
    async fn test_load_fails_soft_on_store_error() {
        let store = MockRatingStore::new();
        store.set_fail_gets(true);

        let snapshot = RatingSnapshot::load(&store, 1200.0, 1_000).await;
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.rating_of("anyone"), 1200.0);
    }
}
