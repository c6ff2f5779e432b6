//! Player roster management over the rating store
//!
//! Adding, adjusting, and removing stored ratings, plus standings. These are
//! data-layer operations only; the rating of record still lives behind the
//! [`RatingStore`] trait.

use crate::config::RatingConfig;
use crate::error::{Result, ScorekeeperError};
use crate::storage::{with_timeout, RatingStore};
use crate::types::PlayerId;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Manages the set of known players and their stored ratings
pub struct RosterManager {
    store: Arc<dyn RatingStore>,
    config: RatingConfig,
    storage_timeout_ms: u64,
}

impl RosterManager {
    pub fn new(store: Arc<dyn RatingStore>, config: RatingConfig) -> Self {
        Self {
            store,
            config,
            storage_timeout_ms: crate::record::recorder::DEFAULT_STORAGE_TIMEOUT_MS,
        }
    }

    /// Override the storage call timeout
    pub fn storage_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.storage_timeout_ms = timeout_ms;
        self
    }

    /// Add a new player, defaulting to the baseline rating
    ///
    /// Returns the stored rating. Unlike the recorder's snapshot path this
    /// surfaces store errors: an existing player must not be re-added.
    pub async fn add_player(&self, player_id: &str, initial_rating: Option<f64>) -> Result<f64> {
        let rating = initial_rating.unwrap_or(self.config.baseline_rating);
        validate_player_id(player_id)?;
        validate_rating(rating)?;

        let existing = with_timeout(
            "rating_store.get_all",
            self.storage_timeout_ms,
            self.store.get_all(),
        )
        .await?;
        if existing.contains_key(player_id) {
            return Err(ScorekeeperError::DuplicatePlayer {
                player_id: player_id.to_string(),
            }
            .into());
        }

        self.put_one(player_id, rating).await?;
        info!("Added player {} with rating {}", player_id, rating);
        Ok(rating)
    }

    /// Overwrite a player's stored rating
    pub async fn set_rating(&self, player_id: &str, rating: f64) -> Result<()> {
        validate_player_id(player_id)?;
        validate_rating(rating)?;
        self.put_one(player_id, rating).await
    }

    /// Remove a player's stored rating; returns whether it existed
    pub async fn remove_player(&self, player_id: &str) -> Result<bool> {
        validate_player_id(player_id)?;
        let removed = with_timeout(
            "rating_store.remove",
            self.storage_timeout_ms,
            self.store.remove(player_id),
        )
        .await?;
        if removed {
            info!("Removed player {}", player_id);
        }
        Ok(removed)
    }

    /// All stored players sorted by rating, best first
    pub async fn standings(&self) -> Result<Vec<(PlayerId, f64)>> {
        let ratings = with_timeout(
            "rating_store.get_all",
            self.storage_timeout_ms,
            self.store.get_all(),
        )
        .await?;

        let mut standings: Vec<(PlayerId, f64)> = ratings.into_iter().collect();
        standings.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        Ok(standings)
    }

    async fn put_one(&self, player_id: &str, rating: f64) -> Result<()> {
        let mut update = HashMap::new();
        update.insert(player_id.to_string(), rating);
        with_timeout(
            "rating_store.put_all",
            self.storage_timeout_ms,
            self.store.put_all(update),
        )
        .await
    }
}

fn validate_player_id(player_id: &str) -> Result<()> {
    if player_id.trim().is_empty() {
        return Err(ScorekeeperError::InvalidInput {
            reason: "Player identifier must not be empty".to_string(),
        }
        .into());
    }
    Ok(())
}

fn validate_rating(rating: f64) -> Result<()> {
    if !rating.is_finite() {
        return Err(ScorekeeperError::InvalidInput {
            reason: format!("Rating must be finite, got {}", rating),
        }
        .into());
    }
    Ok(())
}
