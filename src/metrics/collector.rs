//! Metrics collection using Prometheus
//!
//! Counters for match recording and storage health, registered on an owned
//! registry. There is no exposition endpoint; embedding services scrape via
//! [`MetricsCollector::registry`] or [`MetricsCollector::render`].

use anyhow::Result;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

/// Metrics collector for match recording
#[derive(Clone)]
pub struct MetricsCollector {
    registry: Arc<Registry>,

    /// Fully committed matches (both sub-commits succeeded)
    pub matches_recorded_total: IntCounter,

    /// Per-player rating updates written to the store
    pub rating_updates_total: IntCounter,

    /// Preview computations served
    pub previews_total: IntCounter,

    /// Failed storage sub-commits, labeled by half ("ratings" / "ledger")
    pub storage_failures_total: IntCounterVec,
}

impl MetricsCollector {
    /// Create a new metrics collector with its own registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector on an existing registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let matches_recorded_total = IntCounter::with_opts(Opts::new(
            "matches_recorded_total",
            "Fully committed matches",
        ))?;
        let rating_updates_total = IntCounter::with_opts(Opts::new(
            "rating_updates_total",
            "Per-player rating updates written",
        ))?;
        let previews_total =
            IntCounter::with_opts(Opts::new("previews_total", "Preview computations served"))?;
        let storage_failures_total = IntCounterVec::new(
            Opts::new("storage_failures_total", "Failed storage sub-commits"),
            &["half"],
        )?;

        registry.register(Box::new(matches_recorded_total.clone()))?;
        registry.register(Box::new(rating_updates_total.clone()))?;
        registry.register(Box::new(previews_total.clone()))?;
        registry.register(Box::new(storage_failures_total.clone()))?;

        Ok(Self {
            registry,
            matches_recorded_total,
            rating_updates_total,
            previews_total,
            storage_failures_total,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    /// Record a fully committed match
    pub fn record_match(&self) {
        self.matches_recorded_total.inc();
    }

    /// Record rating updates written to the store
    pub fn record_rating_updates(&self, count: u64) {
        self.rating_updates_total.inc_by(count);
    }

    /// Record a served preview
    pub fn record_preview(&self) {
        self.previews_total.inc();
    }

    /// Record a failed storage sub-commit
    pub fn record_storage_failure(&self, half: &str) {
        self.storage_failures_total.with_label_values(&[half]).inc();
    }

    /// Render all metrics in the Prometheus text format
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new().expect("Failed to create default metrics collector")
    }
}
