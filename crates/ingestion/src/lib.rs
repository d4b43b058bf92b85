//! # Ingestion
//!
//! Telemetry acquisition module.
//!
//! Responsibilities:
//! - Open the configured source (persistent stream or periodic poll)
//! - Convert raw track records into ready-to-dispatch event envelopes
//! - Absorb per-item and per-cycle failures; escalate only fatal ones
//! - Send downstream via tokio mpsc, observing cancellation at every
//!   suspension point
//!
//! ## Usage Example
//!
//! ```ignore
//! use ingestion::SourceAdapter;
//! use tokio_util::sync::CancellationToken;
//!
//! let adapter = SourceAdapter::from_config(&config);
//! let cancel = CancellationToken::new();
//! let (tx, mut rx) = tokio::sync::mpsc::channel(256);
//!
//! tokio::spawn(adapter.run(tx, cancel.clone()));
//! while let Some(envelope) = rx.recv().await {
//!     // dispatch envelope
//! }
//! ```

mod adapter;
mod error;
mod metrics;
mod poll;
mod stream;

// Re-exports
pub use adapter::SourceAdapter;
pub use contracts::EventEnvelope;
pub use error::SourceError;
pub use metrics::{SourceMetrics, SourceMetricsSnapshot};
pub use poll::PolledSource;
pub use stream::StreamSource;
