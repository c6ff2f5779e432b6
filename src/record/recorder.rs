//! Two-phase match commit
//!
//! The recorder validates a submission, snapshots current ratings, runs the
//! engine once per team, and then performs two independent sub-commits: the
//! rating store write and the ledger append. The halves are deliberately not
//! atomic; `CommitOutcome` reports each one so the caller can retry exactly
//! the half that failed. The recorder itself never retries or rolls back.

use crate::config::RatingConfig;
use crate::error::{Result, ScorekeeperError};
use crate::metrics::MetricsCollector;
use crate::rating::engine;
use crate::rating::snapshot::RatingSnapshot;
use crate::record::validation::validate_rosters;
use crate::storage::{with_timeout, MatchLedger, RatingStore};
use crate::types::{
    CommitOutcome, MatchPreview, MatchRecord, MatchSubmission, PlayerId, RatingUpdate, TeamUpdate,
    Winner,
};
use crate::utils::{current_timestamp, generate_match_id};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default bound on every rating store / match ledger call
pub const DEFAULT_STORAGE_TIMEOUT_MS: u64 = 5_000;

/// Records completed matches against the rating store and match ledger
pub struct MatchRecorder {
    store: Arc<dyn RatingStore>,
    ledger: Arc<dyn MatchLedger>,
    config: RatingConfig,
    storage_timeout_ms: u64,
    metrics: Arc<MetricsCollector>,
}

impl MatchRecorder {
    /// Create a new match recorder
    pub fn new(
        store: Arc<dyn RatingStore>,
        ledger: Arc<dyn MatchLedger>,
        config: RatingConfig,
    ) -> Result<Self> {
        let metrics = Arc::new(MetricsCollector::new().unwrap_or_else(|e| {
            warn!("Failed to create metrics collector, using default: {}", e);
            MetricsCollector::default()
        }));

        Self::with_metrics(store, ledger, config, metrics)
    }

    /// Create a new match recorder with a shared metrics collector
    pub fn with_metrics(
        store: Arc<dyn RatingStore>,
        ledger: Arc<dyn MatchLedger>,
        config: RatingConfig,
        metrics: Arc<MetricsCollector>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            store,
            ledger,
            config,
            storage_timeout_ms: DEFAULT_STORAGE_TIMEOUT_MS,
            metrics,
        })
    }

    /// Override the storage call timeout
    pub fn storage_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.storage_timeout_ms = timeout_ms;
        self
    }

    /// Compute rating changes for a finished game without persisting anything
    ///
    /// Same validation and engine path as [`commit_match`](Self::commit_match);
    /// no store or ledger mutation.
    pub async fn preview_match(&self, submission: &MatchSubmission) -> Result<MatchPreview> {
        validate_rosters(&submission.team_a, &submission.team_b, &self.config)?;
        let k_factor = self.resolve_k_factor(submission)?;

        let snapshot = self.load_snapshot().await;
        let (team_a, team_b, updates) = self.compute(submission, &snapshot, k_factor)?;

        self.metrics.record_preview();
        Ok(MatchPreview {
            team_a,
            team_b,
            updates,
        })
    }

    /// Record a finished game
    ///
    /// Validation and engine errors surface immediately as `Err`. Storage
    /// failures do not: both sub-commits are always attempted and their
    /// individual outcomes reported in the returned [`CommitOutcome`].
    pub async fn commit_match(&self, submission: MatchSubmission) -> Result<CommitOutcome> {
        validate_rosters(&submission.team_a, &submission.team_b, &self.config)?;
        let k_factor = self.resolve_k_factor(&submission)?;

        let snapshot = self.load_snapshot().await;
        let (update_a, update_b, updates) = self.compute(&submission, &snapshot, k_factor)?;

        debug!(
            "Computed match update: expected {:.4}, delta {:+.2} vs {:+.2}",
            update_a.expected_score, update_a.delta, update_b.delta
        );

        let record = MatchRecord {
            id: generate_match_id(),
            recorded_at: current_timestamp(),
            team_a: submission.team_a.clone(),
            team_b: submission.team_b.clone(),
            winner: submission.winner,
            k_factor,
            delta_a: update_a.delta,
            delta_b: update_b.delta,
            updates: updates.clone(),
            metadata: submission.metadata.clone(),
        };

        // Sub-commit (a): persist updated ratings for every involved player.
        let new_ratings: HashMap<PlayerId, f64> = updates
            .iter()
            .map(|u| (u.player_id.clone(), u.new_rating))
            .collect();
        let ratings_result = with_timeout(
            "rating_store.put_all",
            self.storage_timeout_ms,
            self.store.put_all(new_ratings),
        )
        .await;

        // Sub-commit (b): append the match record. Attempted even when (a)
        // failed so the caller can retry exactly the half that failed.
        let ledger_result = with_timeout(
            "match_ledger.append",
            self.storage_timeout_ms,
            self.ledger.append(record.clone()),
        )
        .await;

        let ratings_error = ratings_result.err().map(|e| e.to_string());
        let ledger_error = ledger_result.err().map(|e| e.to_string());

        if let Some(e) = &ratings_error {
            warn!("Rating store update failed, ratings not persisted: {}", e);
            self.metrics.record_storage_failure("ratings");
        }
        if let Some(e) = &ledger_error {
            warn!("Match ledger append failed, match not logged: {}", e);
            self.metrics.record_storage_failure("ledger");
        }

        let outcome = CommitOutcome {
            ratings_stored: ratings_error.is_none(),
            match_logged: ledger_error.is_none(),
            ratings_error,
            ledger_error,
            record,
        };

        if outcome.is_complete() {
            info!(
                "Recorded match {}: {} beat {} (delta {:+.1})",
                outcome.record.id,
                winner_roster(&outcome.record).join(", "),
                loser_roster(&outcome.record).join(", "),
                winner_delta(&outcome.record)
            );
            self.metrics.record_match();
            self.metrics
                .record_rating_updates(outcome.record.updates.len() as u64);
        }

        Ok(outcome)
    }

    /// Resolve the K-factor for a submission, falling back to the default
    fn resolve_k_factor(&self, submission: &MatchSubmission) -> Result<f64> {
        let k_factor = submission.k_factor.unwrap_or(self.config.default_k_factor);
        if !k_factor.is_finite() || k_factor <= 0.0 {
            return Err(ScorekeeperError::InvalidInput {
                reason: format!("K-factor must be positive and finite, got {}", k_factor),
            }
            .into());
        }
        Ok(k_factor)
    }

    async fn load_snapshot(&self) -> RatingSnapshot {
        RatingSnapshot::load(
            self.store.as_ref(),
            self.config.baseline_rating,
            self.storage_timeout_ms,
        )
        .await
    }

    /// Run the engine once per team and expand the per-team deltas into
    /// per-player updates, team A first
    fn compute(
        &self,
        submission: &MatchSubmission,
        snapshot: &RatingSnapshot,
        k_factor: f64,
    ) -> Result<(TeamUpdate, TeamUpdate, Vec<RatingUpdate>)> {
        let ratings_a = snapshot.ratings_for(&submission.team_a);
        let ratings_b = snapshot.ratings_for(&submission.team_b);
        let a_won = submission.winner == Winner::TeamA;

        let update_a = engine::team_update(&ratings_a, &ratings_b, a_won, k_factor)?;
        let update_b = engine::team_update(&ratings_b, &ratings_a, !a_won, k_factor)?;

        let updates = submission
            .team_a
            .iter()
            .map(|p| player_update(p, snapshot, update_a.delta))
            .chain(
                submission
                    .team_b
                    .iter()
                    .map(|p| player_update(p, snapshot, update_b.delta)),
            )
            .collect();

        Ok((update_a, update_b, updates))
    }
}

fn player_update(player_id: &str, snapshot: &RatingSnapshot, delta: f64) -> RatingUpdate {
    let old_rating = snapshot.rating_of(player_id);
    RatingUpdate {
        player_id: player_id.to_string(),
        old_rating,
        new_rating: old_rating + delta,
        delta,
    }
}

fn winner_roster(record: &MatchRecord) -> &[PlayerId] {
    match record.winner {
        Winner::TeamA => &record.team_a,
        Winner::TeamB => &record.team_b,
    }
}

fn loser_roster(record: &MatchRecord) -> &[PlayerId] {
    match record.winner {
        Winner::TeamA => &record.team_b,
        Winner::TeamB => &record.team_a,
    }
}

fn winner_delta(record: &MatchRecord) -> f64 {
    match record.winner {
        Winner::TeamA => record.delta_a,
        Winner::TeamB => record.delta_b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{InMemoryMatchLedger, InMemoryRatingStore};

    fn roster(names: &[&str]) -> Vec<PlayerId> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn recorder() -> MatchRecorder {
        MatchRecorder::new(
            Arc::new(InMemoryRatingStore::new()),
            Arc::new(InMemoryMatchLedger::new()),
            RatingConfig::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_every_member_gets_the_team_delta() {
        let store = Arc::new(InMemoryRatingStore::with_ratings(
            [
                ("a1".to_string(), 1000.0),
                ("a2".to_string(), 1400.0),
                ("b1".to_string(), 1200.0),
                ("b2".to_string(), 1200.0),
            ]
            .into_iter()
            .collect(),
        ));
        let recorder = MatchRecorder::new(
            store,
            Arc::new(InMemoryMatchLedger::new()),
            RatingConfig::default(),
        )
        .unwrap();

        let submission =
            MatchSubmission::new(roster(&["a1", "a2"]), roster(&["b1", "b2"]), Winner::TeamA);
        let preview = recorder.preview_match(&submission).await.unwrap();

        // Identical delta for both members of team A despite the 400-point spread
        assert_eq!(preview.updates[0].delta, preview.team_a.delta);
        assert_eq!(preview.updates[1].delta, preview.team_a.delta);
        assert_eq!(preview.updates[0].old_rating, 1000.0);
        assert_eq!(preview.updates[1].old_rating, 1400.0);
    }

    #[tokio::test]
    async fn test_submission_k_factor_overrides_default() {
        let recorder = recorder();

        let mut submission =
            MatchSubmission::new(roster(&["a", "b"]), roster(&["c", "d"]), Winner::TeamA);
        submission.k_factor = Some(64.0);

        let preview = recorder.preview_match(&submission).await.unwrap();
        assert!((preview.team_a.delta - 32.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_invalid_k_factor_rejected_before_commit() {
        let recorder = recorder();

        let mut submission =
            MatchSubmission::new(roster(&["a", "b"]), roster(&["c", "d"]), Winner::TeamA);
        submission.k_factor = Some(-1.0);

        assert!(recorder.commit_match(submission).await.is_err());
    }

    #[tokio::test]
    async fn test_record_carries_metadata_and_k() {
        let recorder = recorder();

        let mut submission =
            MatchSubmission::new(roster(&["a", "b"]), roster(&["c", "d"]), Winner::TeamB);
        submission.metadata = Some(crate::types::MatchMetadata {
            traitor: Some("a".to_string()),
            eliminated: None,
            notes: Some("close game".to_string()),
        });

        let outcome = recorder.commit_match(submission).await.unwrap();
        assert!(outcome.is_complete());
        assert_eq!(outcome.record.k_factor, 32.0);
        let metadata = outcome.record.metadata.unwrap();
        assert_eq!(metadata.traitor.as_deref(), Some("a"));
        assert_eq!(metadata.notes.as_deref(), Some("close game"));
    }
}
