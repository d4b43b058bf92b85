//! LogSink - logs event summaries via tracing
//!
//! Diagnostic sink for standalone runs and tests.

use async_trait::async_trait;
use tracing::info;

use contracts::{EventEnvelope, EventSink, FeederError};

/// Sink that logs event summaries for debugging
pub struct LogSink {
    name: String,
}

impl LogSink {
    /// Create a new LogSink with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl EventSink for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&mut self, event: &EventEnvelope) -> Result<(), FeederError> {
        info!(
            sink = %self.name,
            uid = %event.uid,
            bytes = event.payload.len(),
            "event received"
        );
        Ok(())
    }

    async fn close(&mut self) -> Result<(), FeederError> {
        info!(sink = %self.name, "LogSink closed");
        Ok(())
    }
}
