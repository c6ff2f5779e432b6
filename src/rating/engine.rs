//! Pure Elo calculations over composite team ratings
//!
//! The whole team is treated as one composite player: the logistic
//! expectation is evaluated once on the team averages, and the resulting
//! delta is applied uniformly to every member regardless of their individual
//! rating. Deltas must not be individualized per player.

use crate::error::{Result, ScorekeeperError};
use crate::types::TeamUpdate;
use crate::utils::mean;
use skillratings::elo::EloRating;

/// Expected score of a side rated `team_avg` against one rated `opponent_avg`
///
/// Standard Elo logistic expectation, `1 / (1 + 10^((b - a) / 400))`.
/// Strictly within (0, 1) for finite inputs and exactly 0.5 when equal.
pub fn expected_score(team_avg: f64, opponent_avg: f64) -> f64 {
    let (expected, _) = skillratings::elo::expected_score(
        &EloRating { rating: team_avg },
        &EloRating {
            rating: opponent_avg,
        },
    );
    expected
}

/// Compute the rating update for one team of a finished match
///
/// Called once per team per match; the two calls are symmetric, so with the
/// same K-factor on both sides the deltas sum to zero.
pub fn team_update(
    team_ratings: &[f64],
    opponent_ratings: &[f64],
    won: bool,
    k_factor: f64,
) -> Result<TeamUpdate> {
    if !k_factor.is_finite() || k_factor <= 0.0 {
        return Err(ScorekeeperError::InvalidInput {
            reason: format!("K-factor must be positive and finite, got {}", k_factor),
        }
        .into());
    }

    if let Some(bad) = team_ratings
        .iter()
        .chain(opponent_ratings)
        .find(|r| !r.is_finite())
    {
        return Err(ScorekeeperError::InvalidInput {
            reason: format!("Ratings must be finite, got {}", bad),
        }
        .into());
    }

    let team_avg = mean(team_ratings).ok_or(ScorekeeperError::InvalidInput {
        reason: "Team roster is empty".to_string(),
    })?;
    let opponent_avg = mean(opponent_ratings).ok_or(ScorekeeperError::InvalidInput {
        reason: "Opponent roster is empty".to_string(),
    })?;

    let expected = expected_score(team_avg, opponent_avg);
    let actual = if won { 1.0 } else { 0.0 };

    Ok(TeamUpdate {
        expected_score: expected,
        delta: k_factor * (actual - expected),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_equal_averages_expect_half() {
        assert!((expected_score(1200.0, 1200.0) - 0.5).abs() < 1e-12);
        assert!((expected_score(800.0, 800.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_expected_score_bounds() {
        for diff in [-2000.0, -400.0, -1.0, 1.0, 400.0, 2000.0] {
            let expected = expected_score(1200.0 + diff, 1200.0);
            assert!(expected > 0.0 && expected < 1.0);
        }
        // Higher-rated side is favored
        assert!(expected_score(1400.0, 1200.0) > 0.5);
        assert!(expected_score(1200.0, 1400.0) < 0.5);
    }

    #[test]
    fn test_evenly_matched_win_moves_sixteen() {
        let update = team_update(&[1200.0, 1200.0], &[1200.0, 1200.0], true, 32.0).unwrap();
        assert!((update.expected_score - 0.5).abs() < 1e-12);
        assert!((update.delta - 16.0).abs() < 1e-12);

        let loser = team_update(&[1200.0, 1200.0], &[1200.0, 1200.0], false, 32.0).unwrap();
        assert!((loser.delta + 16.0).abs() < 1e-12);
    }

    #[test]
    fn test_favorite_losing_costs_more() {
        // 1400 avg vs 1200 avg, favorite loses with k=32
        let favorite = team_update(&[1400.0, 1400.0], &[1200.0, 1200.0], false, 32.0).unwrap();
        assert!((favorite.expected_score - 0.7597).abs() < 1e-4);
        assert!((favorite.delta - (-24.3119)).abs() < 1e-3);

        let underdog = team_update(&[1200.0, 1200.0], &[1400.0, 1400.0], true, 32.0).unwrap();
        assert!((underdog.delta - 24.3119).abs() < 1e-3);
    }

    #[test]
    fn test_team_average_is_what_counts() {
        // Mixed roster with the same average as a flat one gives the same delta
        let mixed = team_update(&[1000.0, 1400.0], &[1200.0, 1200.0], true, 32.0).unwrap();
        let flat = team_update(&[1200.0, 1200.0], &[1200.0, 1200.0], true, 32.0).unwrap();
        assert!((mixed.delta - flat.delta).abs() < 1e-12);
    }

    #[test]
    fn test_empty_rosters_rejected() {
        assert!(team_update(&[], &[1200.0], true, 32.0).is_err());
        assert!(team_update(&[1200.0], &[], true, 32.0).is_err());
    }

    #[test]
    fn test_bad_k_factor_rejected() {
        assert!(team_update(&[1200.0], &[1200.0], true, 0.0).is_err());
        assert!(team_update(&[1200.0], &[1200.0], true, -32.0).is_err());
        assert!(team_update(&[1200.0], &[1200.0], true, f64::NAN).is_err());
    }

    #[test]
    fn test_non_finite_rating_rejected() {
        assert!(team_update(&[f64::INFINITY], &[1200.0], true, 32.0).is_err());
        assert!(team_update(&[1200.0], &[f64::NAN], true, 32.0).is_err());
    }

    #[test]
    fn test_ratings_may_go_negative() {
        // A very low-rated side losing keeps dropping; no clamping
        let update = team_update(&[5.0], &[2000.0], false, 64.0).unwrap();
        assert!(5.0 + update.delta < 5.0);
    }

    proptest! {
        // Symmetric expectations make the two team deltas cancel exactly
        #[test]
        fn prop_deltas_are_zero_sum(
            a in proptest::collection::vec(0.0f64..3000.0, 1..6),
            b in proptest::collection::vec(0.0f64..3000.0, 1..6),
            k in 1.0f64..64.0,
        ) {
            let update_a = team_update(&a, &b, true, k).unwrap();
            let update_b = team_update(&b, &a, false, k).unwrap();
            prop_assert!((update_a.delta + update_b.delta).abs() < 1e-9);
            prop_assert!((update_a.expected_score + update_b.expected_score - 1.0).abs() < 1e-9);
        }
    }
}
