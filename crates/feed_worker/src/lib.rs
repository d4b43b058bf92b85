//! # Feed Worker
//!
//! Lifecycle owner for one feed pipeline.
//!
//! Responsibilities:
//! - Register the feed identity with the hosting system (idempotent)
//! - Optionally supervise an external generator child process
//! - Run the configured source adapter on a dedicated background task
//! - Drain envelopes into the dispatcher in production order
//! - Tear everything down cleanly on stop, within a bounded grace period

mod error;
mod process;
mod worker;

pub use error::WorkerError;
pub use worker::{FeedWorker, WorkerState, DEFAULT_CHANNEL_CAPACITY, STOP_GRACE_PERIOD};
