//! # Dispatcher
//!
//! Event fan-out module.
//!
//! Responsibilities:
//! - Deliver each `EventEnvelope` to every configured sink
//! - Isolate failures per sink per event; one sink never blocks another
//! - Report per-sink outcomes to the caller, never raise past itself

pub mod dispatcher;
pub mod error;
pub mod metrics;
pub mod sinks;

pub use contracts::{EventEnvelope, EventSink};
pub use dispatcher::{DispatchReport, Dispatcher, SinkOutcome};
pub use error::DispatcherError;
pub use metrics::{SinkMetrics, SinkMetricsSnapshot};
pub use sinks::{FeedSink, LogSink, UdpSink};
