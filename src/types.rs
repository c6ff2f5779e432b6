//! Common types used throughout the scorekeeper service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for players
pub type PlayerId = String;

/// Unique identifier for recorded matches
pub type MatchId = Uuid;

/// Which of the two opposing sides won the match
///
/// Exactly one side wins; draws are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    TeamA,
    TeamB,
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::TeamA => write!(f, "team A"),
            Winner::TeamB => write!(f, "team B"),
        }
    }
}

/// Optional structured metadata attached to a match record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchMetadata {
    /// Designated special role for the game variant (e.g. the traitor)
    pub traitor: Option<PlayerId>,
    /// Player eliminated during the game, if any
    pub eliminated: Option<PlayerId>,
    /// Free-text notes
    pub notes: Option<String>,
}

impl MatchMetadata {
    pub fn is_empty(&self) -> bool {
        self.traitor.is_none() && self.eliminated.is_none() && self.notes.is_none()
    }
}

/// Rating change for a single player in a single match
///
/// `new_rating = old_rating + delta`; every member of a team receives the
/// same delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingUpdate {
    pub player_id: PlayerId,
    pub old_rating: f64,
    pub new_rating: f64,
    pub delta: f64,
}

/// Engine output for one team
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamUpdate {
    /// Predicted win probability from the team-average expectation
    pub expected_score: f64,
    /// Rating change applied to every team member
    pub delta: f64,
}

/// A completed game submitted for preview or recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSubmission {
    pub team_a: Vec<PlayerId>,
    pub team_b: Vec<PlayerId>,
    pub winner: Winner,
    /// Per-match K-factor; falls back to the configured default
    pub k_factor: Option<f64>,
    pub metadata: Option<MatchMetadata>,
}

impl MatchSubmission {
    pub fn new(team_a: Vec<PlayerId>, team_b: Vec<PlayerId>, winner: Winner) -> Self {
        Self {
            team_a,
            team_b,
            winner,
            k_factor: None,
            metadata: None,
        }
    }
}

/// Immutable record of a committed match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub recorded_at: DateTime<Utc>,
    pub team_a: Vec<PlayerId>,
    pub team_b: Vec<PlayerId>,
    pub winner: Winner,
    /// K-factor the deltas were computed with
    pub k_factor: f64,
    /// Delta applied to every member of team A
    pub delta_a: f64,
    /// Delta applied to every member of team B
    pub delta_b: f64,
    /// Per-player before/after ratings, team A first
    pub updates: Vec<RatingUpdate>,
    pub metadata: Option<MatchMetadata>,
}

/// Engine output for both teams before any commit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchPreview {
    pub team_a: TeamUpdate,
    pub team_b: TeamUpdate,
    /// Per-player before/after ratings, team A first
    pub updates: Vec<RatingUpdate>,
}

/// Outcome of the two-phase commit
///
/// The rating store write and the ledger append are independent; either half
/// can fail while the other succeeds, and the caller retries just the failed
/// half. `record` is what was (or would have been) appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitOutcome {
    pub record: MatchRecord,
    pub ratings_stored: bool,
    pub match_logged: bool,
    pub ratings_error: Option<String>,
    pub ledger_error: Option<String>,
}

impl CommitOutcome {
    /// Whether both halves of the commit succeeded
    pub fn is_complete(&self) -> bool {
        self.ratings_stored && self.match_logged
    }
}
