//! Dispatcher - per-event fan-out to sinks
//!
//! Given one envelope, attempt delivery to every configured sink
//! independently and record success/failure per sink. Failures are returned
//! to the caller as per-sink outcomes and counted in sink metrics; they are
//! never propagated as a fault that aborts the dispatch call.

use std::sync::Arc;

use metrics::counter;
use tracing::{debug, info, instrument, warn};

use contracts::{DispatchTargets, EventEnvelope, EventSink, FeedIdentity, FeedIngest, FeederError};

use crate::error::DispatcherError;
use crate::metrics::{SinkMetrics, SinkMetricsSnapshot};
use crate::sinks::{FeedSink, UdpSink};

/// One sink's delivery result for one event
#[derive(Debug)]
pub struct SinkOutcome {
    /// Sink name
    pub sink: String,
    /// Delivery result
    pub result: Result<(), FeederError>,
}

/// Per-sink outcomes of one dispatch call
#[derive(Debug, Default)]
pub struct DispatchReport {
    pub outcomes: Vec<SinkOutcome>,
}

impl DispatchReport {
    /// Number of sinks attempted
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of failed deliveries
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    /// True when every attempted delivery succeeded
    pub fn all_ok(&self) -> bool {
        self.failed() == 0
    }
}

struct SinkSlot {
    sink: Box<dyn EventSink>,
    metrics: Arc<SinkMetrics>,
}

/// The dispatcher: owns the configured sinks for one feed
pub struct Dispatcher {
    sinks: Vec<SinkSlot>,
}

impl Dispatcher {
    /// Build a dispatcher from the configured dispatch targets.
    ///
    /// The feed-ingest collaborator is required only when a named-feed
    /// target is configured.
    #[instrument(name = "dispatcher_from_config", skip(targets, feed, ingest), fields(feed_id = %feed.id))]
    pub async fn from_config(
        targets: &DispatchTargets,
        feed: &FeedIdentity,
        ingest: Option<Arc<dyn FeedIngest>>,
    ) -> Result<Self, DispatcherError> {
        let mut sinks: Vec<Box<dyn EventSink>> = Vec::with_capacity(targets.count());

        if let Some(udp) = &targets.udp {
            let sink = UdpSink::connect("udp", udp)
                .await
                .map_err(|e| DispatcherError::sink_creation("udp", e.to_string()))?;
            sinks.push(Box::new(sink));
        }

        if targets.feed.is_some() {
            let api = ingest.ok_or_else(|| {
                DispatcherError::sink_creation("feed", "feed sink requires a feed-ingest api")
            })?;
            sinks.push(Box::new(FeedSink::new("feed", &feed.id, api)));
        }

        if sinks.is_empty() {
            warn!("No sinks configured - events will be dropped");
        }

        Ok(Self::with_sinks(sinks))
    }

    /// Create a dispatcher over explicit sinks (also used by tests)
    pub fn with_sinks(sinks: Vec<Box<dyn EventSink>>) -> Self {
        let sinks = sinks
            .into_iter()
            .map(|sink| SinkSlot {
                sink,
                metrics: Arc::new(SinkMetrics::new()),
            })
            .collect();
        Self { sinks }
    }

    /// Number of configured sinks
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Get metrics for all sinks
    pub fn metrics(&self) -> Vec<(String, SinkMetricsSnapshot)> {
        self.sinks
            .iter()
            .map(|slot| (slot.sink.name().to_string(), slot.metrics.snapshot()))
            .collect()
    }

    /// Deliver one event to every configured sink.
    ///
    /// Each sink gets an attempt regardless of what happened to the sinks
    /// before it; the report carries one outcome per sink.
    #[instrument(name = "dispatcher_dispatch", skip(self, event), fields(uid = %event.uid))]
    pub async fn dispatch(&mut self, event: &EventEnvelope) -> DispatchReport {
        let mut report = DispatchReport::default();

        for slot in &mut self.sinks {
            let result = slot.sink.send(event).await;
            let name = slot.sink.name();
            match &result {
                Ok(()) => {
                    slot.metrics.inc_write_count();
                    counter!("feeder_events_dispatched_total", "sink" => name.to_string())
                        .increment(1);
                }
                Err(e) => {
                    slot.metrics.inc_failure_count();
                    counter!("feeder_dispatch_failures_total", "sink" => name.to_string())
                        .increment(1);
                    // Continue to the remaining sinks - don't let one
                    // delivery failure cancel the others
                    warn!(sink = %name, uid = %event.uid, error = %e, "delivery failed");
                }
            }
            report.outcomes.push(SinkOutcome {
                sink: name.to_string(),
                result,
            });
        }

        report
    }

    /// Close all sinks
    #[instrument(name = "dispatcher_close", skip(self))]
    pub async fn close(&mut self) {
        for slot in &mut self.sinks {
            if let Err(e) = slot.sink.close().await {
                warn!(sink = %slot.sink.name(), error = %e, "close failed");
            } else {
                debug!(sink = %slot.sink.name(), "sink closed");
            }
        }
        info!(sinks = self.sinks.len(), "dispatcher closed");
    }
}
