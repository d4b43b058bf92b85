//! FeedSink - delivery into the hosting system's named feed channel
//!
//! Hands each payload to the external feed-ingest collaborator tagged with
//! the configured feed identity.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, trace};

use contracts::{EventEnvelope, EventSink, FeedIngest, FeederError};

/// Sink that delegates delivery to the feed-ingest API
pub struct FeedSink {
    name: String,
    feed_id: String,
    api: Arc<dyn FeedIngest>,
}

impl FeedSink {
    /// Create a new FeedSink bound to one feed identity
    pub fn new(
        name: impl Into<String>,
        feed_id: impl Into<String>,
        api: Arc<dyn FeedIngest>,
    ) -> Self {
        Self {
            name: name.into(),
            feed_id: feed_id.into(),
            api,
        }
    }

    /// The feed this sink delivers into
    pub fn feed_id(&self) -> &str {
        &self.feed_id
    }
}

#[async_trait]
impl EventSink for FeedSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&mut self, event: &EventEnvelope) -> Result<(), FeederError> {
        self.api.send_event(&event.payload, &self.feed_id).await?;
        trace!(sink = %self.name, feed_id = %self.feed_id, uid = %event.uid, "event delivered");
        Ok(())
    }

    async fn close(&mut self) -> Result<(), FeederError> {
        debug!(sink = %self.name, feed_id = %self.feed_id, "FeedSink closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingIngest {
        sent: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl FeedIngest for RecordingIngest {
        async fn create_feed_if_absent(
            &self,
            _feed_id: &str,
            _display_name: &str,
            _tags: &[String],
        ) -> Result<(), FeederError> {
            Ok(())
        }

        async fn send_event(&self, payload: &str, feed_id: &str) -> Result<(), FeederError> {
            if self.fail {
                return Err(FeederError::feed_ingest(feed_id, "api down"));
            }
            self.sent
                .lock()
                .unwrap()
                .push((payload.to_string(), feed_id.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_delivery_tagged_with_feed_identity() {
        let api = Arc::new(RecordingIngest {
            sent: Mutex::new(Vec::new()),
            fail: false,
        });
        let mut sink = FeedSink::new("feed", "adsb-cot-feed", Arc::clone(&api) as _);

        let event = EventEnvelope::new("adsb-abc123", "<event/>");
        sink.send(&event).await.unwrap();

        let sent = api.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], ("<event/>".to_string(), "adsb-cot-feed".to_string()));
    }

    #[tokio::test]
    async fn test_api_failure_surfaces_as_sink_error() {
        let api = Arc::new(RecordingIngest {
            sent: Mutex::new(Vec::new()),
            fail: true,
        });
        let mut sink = FeedSink::new("feed", "adsb-cot-feed", api as _);

        let event = EventEnvelope::new("adsb-abc123", "<event/>");
        let result = sink.send(&event).await;
        assert!(matches!(result, Err(FeederError::FeedIngest { .. })));
    }
}
