//! Test fixtures shared by the integration tests

use scorekeeper::config::RatingConfig;
use scorekeeper::record::MatchRecorder;
use scorekeeper::storage::{InMemoryMatchLedger, InMemoryRatingStore, MockMatchLedger, MockRatingStore};
use scorekeeper::types::{MatchSubmission, PlayerId, Winner};
use std::collections::HashMap;
use std::sync::Arc;

pub fn roster(names: &[&str]) -> Vec<PlayerId> {
    names.iter().map(|s| s.to_string()).collect()
}

pub fn ratings(entries: &[(&str, f64)]) -> HashMap<PlayerId, f64> {
    entries
        .iter()
        .map(|(id, rating)| (id.to_string(), *rating))
        .collect()
}

pub fn submission(team_a: &[&str], team_b: &[&str], winner: Winner) -> MatchSubmission {
    MatchSubmission::new(roster(team_a), roster(team_b), winner)
}

/// Recorder over real in-memory stores
pub fn in_memory_recorder() -> (
    MatchRecorder,
    Arc<InMemoryRatingStore>,
    Arc<InMemoryMatchLedger>,
) {
    let store = Arc::new(InMemoryRatingStore::new());
    let ledger = Arc::new(InMemoryMatchLedger::new());
    let recorder =
        MatchRecorder::new(store.clone(), ledger.clone(), RatingConfig::default()).unwrap();
    (recorder, store, ledger)
}

/// Recorder over mock stores with call recording and failure injection
pub fn mock_recorder() -> (MatchRecorder, Arc<MockRatingStore>, Arc<MockMatchLedger>) {
    let store = Arc::new(MockRatingStore::new());
    let ledger = Arc::new(MockMatchLedger::new());
    let recorder =
        MatchRecorder::new(store.clone(), ledger.clone(), RatingConfig::default()).unwrap();
    (recorder, store, ledger)
}
