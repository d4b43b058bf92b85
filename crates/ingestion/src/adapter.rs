//! SourceAdapter - one acquisition abstraction, two strategies
//!
//! The stream-consuming and poll-and-encode pipelines share one produced
//! interface: an unbounded sequence of ready-to-dispatch envelopes, sent over
//! an mpsc channel until cancellation or a fatal source error. Only the
//! acquisition strategy varies.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use contracts::{EventEnvelope, FeedConfig, SourceConfig};

use crate::error::SourceError;
use crate::metrics::SourceMetrics;
use crate::poll::PolledSource;
use crate::stream::StreamSource;

/// The configured acquisition strategy
pub enum SourceAdapter {
    /// Persistent line-oriented stream of pre-encoded events
    Stream(StreamSource),

    /// Periodic fetch of raw track records, encoded locally
    Poll(PolledSource),
}

impl SourceAdapter {
    /// Build the adapter named by the feed configuration
    pub fn from_config(config: &FeedConfig) -> Self {
        match &config.source {
            SourceConfig::Stream(stream) => {
                Self::Stream(StreamSource::new(stream.clone(), config.feed.id.clone()))
            }
            SourceConfig::Poll(poll) => Self::Poll(PolledSource::new(poll.clone())),
        }
    }

    /// Short variant label for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stream(_) => "stream",
            Self::Poll(_) => "poll",
        }
    }

    /// Get a handle to the source metrics
    pub fn metrics(&self) -> Arc<SourceMetrics> {
        match self {
            Self::Stream(source) => source.metrics(),
            Self::Poll(source) => source.metrics(),
        }
    }

    /// Run the adapter until cancellation or a fatal source error.
    ///
    /// Consumes the adapter: the sequence is not restartable and a fresh
    /// instance is required after termination.
    pub async fn run(
        self,
        tx: mpsc::Sender<EventEnvelope>,
        cancel: CancellationToken,
    ) -> Result<(), SourceError> {
        match self {
            Self::Stream(source) => source.run(tx, cancel).await,
            Self::Poll(source) => source.run(tx, cancel).await,
        }
    }
}
