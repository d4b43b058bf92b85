//! FeedIngest trait - the hosting system's feed API
//!
//! The core only calls this interface; the hosting system implements it.

use async_trait::async_trait;

use crate::FeederError;

/// Feed-ingest collaborator interface.
///
/// Implemented by the hosting system (or by a diagnostic placeholder for
/// standalone runs). "Feed already exists" is success, not an error.
#[async_trait]
pub trait FeedIngest: Send + Sync {
    /// Register the feed channel if it does not already exist
    async fn create_feed_if_absent(
        &self,
        feed_id: &str,
        display_name: &str,
        tags: &[String],
    ) -> Result<(), FeederError>;

    /// Deliver one event payload into the named feed channel
    async fn send_event(&self, payload: &str, feed_id: &str) -> Result<(), FeederError>;
}
