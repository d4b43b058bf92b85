//! Standalone feed-ingest placeholder
//!
//! The real `FeedIngest` implementation belongs to the hosting system that
//! embeds the worker. Standalone runs get this logging stand-in so the feed
//! sink path stays exercised end to end.

use async_trait::async_trait;
use tracing::{debug, info};

use contracts::{FeedIngest, FeederError};

/// Feed-ingest API that logs instead of delivering into a host system
pub struct LogFeedIngest;

#[async_trait]
impl FeedIngest for LogFeedIngest {
    async fn create_feed_if_absent(
        &self,
        feed_id: &str,
        display_name: &str,
        tags: &[String],
    ) -> Result<(), FeederError> {
        info!(
            feed_id = %feed_id,
            name = %display_name,
            tags = ?tags,
            "feed registered (standalone mode)"
        );
        Ok(())
    }

    async fn send_event(&self, payload: &str, feed_id: &str) -> Result<(), FeederError> {
        debug!(
            feed_id = %feed_id,
            bytes = payload.len(),
            "event delivered (standalone mode)"
        );
        Ok(())
    }
}
