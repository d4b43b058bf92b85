//! PolledSource - periodic fetch against a remote aircraft.json endpoint
//!
//! Fixed-delay scheduling: the first fetch is immediate and each subsequent
//! fetch starts `interval` after the previous cycle completes, so a slow
//! fetch delays only its own successor and cycles never overlap. A failed
//! cycle is skipped, never fatal; a failed entry is skipped, the rest of the
//! fetch proceeds.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use metrics::counter;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use contracts::{EventEnvelope, PollSourceConfig, TrackRecord};

use crate::error::SourceError;
use crate::metrics::SourceMetrics;

/// Response document: a top-level `aircraft` array of track entries.
///
/// Entries stay as raw values here so one malformed entry never poisons the
/// whole fetch.
#[derive(Debug, Deserialize)]
struct PollDocument {
    aircraft: Vec<serde_json::Value>,
}

/// Source that polls a remote HTTP endpoint for raw track records
pub struct PolledSource {
    config: PollSourceConfig,
    client: reqwest::Client,
    metrics: Arc<SourceMetrics>,
}

impl PolledSource {
    /// Create a new PolledSource
    pub fn new(config: PollSourceConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            metrics: Arc::new(SourceMetrics::new()),
        }
    }

    /// Get a handle to the source metrics
    pub fn metrics(&self) -> Arc<SourceMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Run the fetch loop until cancellation.
    ///
    /// One-shot: the source is consumed. Unlike the stream variant this
    /// never terminates with an error; the remote endpoint being down is a
    /// per-cycle condition.
    pub async fn run(
        self,
        tx: mpsc::Sender<EventEnvelope>,
        cancel: CancellationToken,
    ) -> Result<(), SourceError> {
        let interval = Duration::from_secs(self.config.interval_secs);
        info!(
            url = %self.config.url,
            interval_secs = self.config.interval_secs,
            "polled source started"
        );

        loop {
            let receiver_open = tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(url = %self.config.url, "polled source cancelled");
                    return Ok(());
                }
                open = self.fetch_cycle(&tx) => open,
            };
            if !receiver_open {
                debug!(url = %self.config.url, "event channel closed, stopping");
                return Ok(());
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(url = %self.config.url, "polled source cancelled");
                    return Ok(());
                }
                _ = tokio::time::sleep(interval) => {}
            }
        }
    }

    /// One fetch+encode+dispatch cycle. Returns false when the receiver is
    /// gone (worker shutting down).
    async fn fetch_cycle(&self, tx: &mpsc::Sender<EventEnvelope>) -> bool {
        self.metrics.record_fetch_attempt();

        let entries = match self.fetch_entries().await {
            Ok(entries) => entries,
            Err(message) => {
                self.metrics.record_fetch_failure();
                counter!("feeder_poll_fetch_failures_total").increment(1);
                warn!(url = %self.config.url, error = %message, "fetch cycle failed, skipping");
                return true;
            }
        };

        let now = Utc::now();
        let mut emitted = 0usize;

        for entry in entries {
            let record = match serde_json::from_value::<TrackRecord>(entry) {
                Ok(record) => record,
                Err(e) => {
                    self.metrics.record_item_skipped();
                    warn!(url = %self.config.url, error = %e, "skipping malformed track entry");
                    continue;
                }
            };
            if record.hex.is_empty() {
                self.metrics.record_item_skipped();
                warn!(url = %self.config.url, "skipping track entry with empty identity");
                continue;
            }

            let event = cot::encode_track(&record, now);
            let envelope = EventEnvelope::new(event.uid.clone(), event.to_xml());
            if tx.send(envelope).await.is_err() {
                return false;
            }
            self.metrics.record_event();
            emitted += 1;
        }

        debug!(url = %self.config.url, events = emitted, "fetch cycle complete");
        true
    }

    async fn fetch_entries(&self) -> Result<Vec<serde_json::Value>, String> {
        let response = self
            .client
            .get(&self.config.url)
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;

        let document: PollDocument = response.json().await.map_err(|e| e.to_string())?;
        Ok(document.aircraft)
    }
}
