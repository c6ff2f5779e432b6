//! Metrics collection for the scorekeeper service

pub mod collector;

// Re-export commonly used types
pub use collector::MetricsCollector;
