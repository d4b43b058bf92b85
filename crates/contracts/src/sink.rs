//! EventSink trait - Dispatcher output interface
//!
//! Defines the abstract interface for sinks.

use async_trait::async_trait;

use crate::{EventEnvelope, FeederError};

/// Event delivery trait
///
/// All sink implementations must implement this trait. Object-safe so the
/// dispatcher can hold a heterogeneous set of configured sinks.
#[async_trait]
pub trait EventSink: Send {
    /// Sink name (used for logging/metrics and outcome reports)
    fn name(&self) -> &str;

    /// Deliver one event
    ///
    /// # Errors
    /// Returns the delivery error (should include context). Failures are
    /// recorded per sink by the dispatcher and never cancel other sinks.
    async fn send(&mut self, event: &EventEnvelope) -> Result<(), FeederError>;

    /// Close sink
    async fn close(&mut self) -> Result<(), FeederError>;
}
