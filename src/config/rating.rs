//! Rating system configuration

use crate::error::{Result, ScorekeeperError};
use serde::{Deserialize, Serialize};

/// Elo parameters and roster bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Rating assigned to players absent from the rating store
    pub baseline_rating: f64,
    /// K-factor used when a submission does not carry its own
    pub default_k_factor: f64,
    /// Smallest legal roster per team
    pub min_team_size: usize,
    /// Largest legal roster per team
    pub max_team_size: usize,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            baseline_rating: 1200.0,
            default_k_factor: 32.0,
            min_team_size: 2,
            max_team_size: 6,
        }
    }
}

impl RatingConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.baseline_rating.is_finite() {
            return Err(ScorekeeperError::ConfigurationError {
                message: "Baseline rating must be finite".to_string(),
            }
            .into());
        }

        if !self.default_k_factor.is_finite() || self.default_k_factor <= 0.0 {
            return Err(ScorekeeperError::ConfigurationError {
                message: "Default K-factor must be positive".to_string(),
            }
            .into());
        }

        if self.min_team_size == 0 {
            return Err(ScorekeeperError::ConfigurationError {
                message: "Minimum team size must be at least 1".to_string(),
            }
            .into());
        }

        if self.max_team_size < self.min_team_size {
            return Err(ScorekeeperError::ConfigurationError {
                message: "Maximum team size must not be below the minimum".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
