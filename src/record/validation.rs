//! Roster validation for match submissions
//!
//! All checks run before any storage traffic, so a rejected submission
//! leaves the rating store and the match ledger untouched.

use crate::config::RatingConfig;
use crate::error::{Result, ScorekeeperError};
use crate::types::PlayerId;
use std::collections::HashSet;

/// Check both rosters against the configured bounds and disjointness rules
///
/// A repeated identifier within one roster is `DuplicatePlayer`; a player
/// appearing on both teams is `RosterConflict`.
pub fn validate_rosters(
    team_a: &[PlayerId],
    team_b: &[PlayerId],
    config: &RatingConfig,
) -> Result<()> {
    validate_team(team_a, "Team A", config)?;
    validate_team(team_b, "Team B", config)?;

    let side_a: HashSet<&str> = team_a.iter().map(String::as_str).collect();
    for player in team_b {
        if side_a.contains(player.as_str()) {
            return Err(ScorekeeperError::RosterConflict {
                player_id: player.clone(),
            }
            .into());
        }
    }

    Ok(())
}

fn validate_team(roster: &[PlayerId], label: &str, config: &RatingConfig) -> Result<()> {
    if roster.is_empty() {
        return Err(ScorekeeperError::InvalidInput {
            reason: format!("{} roster is empty", label),
        }
        .into());
    }

    if roster.len() < config.min_team_size || roster.len() > config.max_team_size {
        return Err(ScorekeeperError::InvalidInput {
            reason: format!(
                "{} has {} players, allowed {}..={}",
                label,
                roster.len(),
                config.min_team_size,
                config.max_team_size
            ),
        }
        .into());
    }

    let mut seen = HashSet::new();
    for player in roster {
        if player.is_empty() {
            return Err(ScorekeeperError::InvalidInput {
                reason: format!("{} contains an empty player identifier", label),
            }
            .into());
        }
        if !seen.insert(player.as_str()) {
            return Err(ScorekeeperError::DuplicatePlayer {
                player_id: player.clone(),
            }
            .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> Vec<PlayerId> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn config() -> RatingConfig {
        RatingConfig::default()
    }

    #[test]
    fn test_valid_rosters_pass() {
        let result = validate_rosters(&roster(&["a", "b"]), &roster(&["c", "d", "e"]), &config());
        assert!(result.is_ok());
    }

    #[test]
    fn test_overlapping_rosters_conflict() {
        let err = validate_rosters(&roster(&["x", "y"]), &roster(&["y", "z"]), &config())
            .unwrap_err();
        match err.downcast_ref::<ScorekeeperError>() {
            Some(ScorekeeperError::RosterConflict { player_id }) => assert_eq!(player_id, "y"),
            other => panic!("expected RosterConflict, got {:?}", other),
        }
    }

    #[test]
    fn test_repeated_player_in_roster() {
        let err = validate_rosters(&roster(&["a", "a"]), &roster(&["c", "d"]), &config())
            .unwrap_err();
        match err.downcast_ref::<ScorekeeperError>() {
            Some(ScorekeeperError::DuplicatePlayer { player_id }) => assert_eq!(player_id, "a"),
            other => panic!("expected DuplicatePlayer, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_roster_rejected() {
        assert!(validate_rosters(&[], &roster(&["c", "d"]), &config()).is_err());
        assert!(validate_rosters(&roster(&["a", "b"]), &[], &config()).is_err());
    }

    #[test]
    fn test_roster_size_bounds() {
        // Default bounds are 2..=6
        assert!(validate_rosters(&roster(&["a"]), &roster(&["c", "d"]), &config()).is_err());
        let seven = roster(&["a", "b", "c", "d", "e", "f", "g"]);
        assert!(validate_rosters(&seven, &roster(&["x", "y"]), &config()).is_err());

        // Loosened bounds admit solo teams
        let loose = RatingConfig {
            min_team_size: 1,
            ..RatingConfig::default()
        };
        assert!(validate_rosters(&roster(&["a"]), &roster(&["b"]), &loose).is_ok());
    }

    #[test]
    fn test_blank_identifier_rejected() {
        assert!(validate_rosters(&roster(&["a", ""]), &roster(&["c", "d"]), &config()).is_err());
    }
}
