//! StreamSource - persistent line-oriented event stream
//!
//! Reads newline-delimited pre-encoded event lines from a TCP connection and
//! passes them through without re-encoding. A malformed line is skipped;
//! connection loss while the worker has not asked to stop is fatal and ends
//! the sequence (recovery is the worker's stop/start cycle, not a reconnect
//! loop here).

use std::sync::Arc;

use metrics::counter;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use contracts::{EventEnvelope, StreamSourceConfig};

use crate::error::SourceError;
use crate::metrics::SourceMetrics;

/// Source that consumes pre-encoded event lines from a TCP stream
pub struct StreamSource {
    config: StreamSourceConfig,
    feed_id: String,
    metrics: Arc<SourceMetrics>,
}

impl StreamSource {
    /// Create a new StreamSource.
    ///
    /// `feed_id` becomes the envelope identity for pass-through lines.
    pub fn new(config: StreamSourceConfig, feed_id: impl Into<String>) -> Self {
        Self {
            config,
            feed_id: feed_id.into(),
            metrics: Arc::new(SourceMetrics::new()),
        }
    }

    /// Get a handle to the source metrics
    pub fn metrics(&self) -> Arc<SourceMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Run the read loop until cancellation or a fatal stream error.
    ///
    /// One-shot: the source is consumed and a fresh instance is required
    /// after termination.
    pub async fn run(
        self,
        tx: mpsc::Sender<EventEnvelope>,
        cancel: CancellationToken,
    ) -> Result<(), SourceError> {
        let endpoint = self.config.endpoint();

        let stream = tokio::select! {
            _ = cancel.cancelled() => {
                debug!(endpoint = %endpoint, "stream source cancelled before connect");
                return Ok(());
            }
            result = TcpStream::connect(&endpoint) => {
                result.map_err(|e| SourceError::connect(&endpoint, e))?
            }
        };

        info!(endpoint = %endpoint, feed_id = %self.feed_id, "stream source connected");

        let mut lines = BufReader::new(stream).lines();

        loop {
            let read = tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(endpoint = %endpoint, "stream source cancelled");
                    return Ok(());
                }
                read = lines.next_line() => read,
            };

            match read {
                Ok(Some(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if let Err(e) = cot::parse_cot(line) {
                        self.metrics.record_item_skipped();
                        counter!("feeder_stream_lines_skipped_total").increment(1);
                        warn!(endpoint = %endpoint, error = %e, "skipping malformed event line");
                        continue;
                    }
                    if tx
                        .send(EventEnvelope::new(self.feed_id.as_str(), line))
                        .await
                        .is_err()
                    {
                        debug!(endpoint = %endpoint, "event channel closed, stopping");
                        return Ok(());
                    }
                    self.metrics.record_event();
                }
                // End-of-stream and read errors terminate the sequence;
                // they are fatal only when nobody asked us to stop.
                Ok(None) => {
                    if cancel.is_cancelled() {
                        return Ok(());
                    }
                    return Err(SourceError::closed(&endpoint));
                }
                Err(e) => {
                    if cancel.is_cancelled() {
                        return Ok(());
                    }
                    return Err(SourceError::read(&endpoint, e));
                }
            }
        }
    }
}
