//! Source metrics

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for a running source adapter
#[derive(Debug, Default)]
pub struct SourceMetrics {
    /// Events emitted downstream
    pub events_emitted: AtomicU64,

    /// Malformed lines / track entries skipped
    pub items_skipped: AtomicU64,

    /// Poll fetch cycles attempted
    pub fetch_attempts: AtomicU64,

    /// Poll fetch cycles that failed whole
    pub fetch_failures: AtomicU64,
}

impl SourceMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an emitted event
    pub fn record_event(&self) {
        self.events_emitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a skipped item
    pub fn record_item_skipped(&self) {
        self.items_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a fetch attempt
    pub fn record_fetch_attempt(&self) {
        self.fetch_attempts.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a whole-fetch failure
    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot
    pub fn snapshot(&self) -> SourceMetricsSnapshot {
        SourceMetricsSnapshot {
            events_emitted: self.events_emitted.load(Ordering::Relaxed),
            items_skipped: self.items_skipped.load(Ordering::Relaxed),
            fetch_attempts: self.fetch_attempts.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
        }
    }
}

/// Metrics snapshot
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceMetricsSnapshot {
    pub events_emitted: u64,
    pub items_skipped: u64,
    pub fetch_attempts: u64,
    pub fetch_failures: u64,
}
