//! Utility functions for the scorekeeper service

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique match ID
pub fn generate_match_id() -> Uuid {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Mean of a rating sequence; `None` when the sequence is empty
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Format a rating delta with an explicit sign and one decimal place
pub fn format_delta(delta: f64) -> String {
    format!("{:+.1}", delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_unique_ids() {
        let id1 = generate_match_id();
        let id2 = generate_match_id();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1200.0, 1400.0]), Some(1300.0));
        assert_eq!(mean(&[1500.0]), Some(1500.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_format_delta() {
        assert_eq!(format_delta(16.0), "+16.0");
        assert_eq!(format_delta(-24.31), "-24.3");
        assert_eq!(format_delta(0.0), "+0.0");
    }
}
