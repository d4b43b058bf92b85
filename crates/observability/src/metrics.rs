//! Feeder metric recording helpers

use metrics::counter;

/// Record one event travelling the pipeline (post-dispatch)
pub fn record_pipeline_event(source: &str) {
    counter!("feeder_pipeline_events_total", "source" => source.to_string()).increment(1);
}

/// Record a worker ending on a fatal source error
pub fn record_worker_failure(feed_id: &str) {
    counter!("feeder_worker_failures_total", "feed_id" => feed_id.to_string()).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_exporter_is_a_noop() {
        // No recorder installed: must not panic
        record_pipeline_event("stream");
        record_worker_failure("adsb-cot-feed");
    }
}
