//! # Integration Tests
//!
//! Cross-crate end-to-end scenarios.
//!
//! Covers:
//! - Poll mode: remote document → encoded events → sinks
//! - Stream mode: pass-through lines, malformed-line isolation
//! - Dual-sink dispatch (UDP + named feed) from one worker

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::EventEnvelope::new("uid", "payload");
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, UdpSocket};

    use chrono::{TimeZone, Utc};
    use contracts::{
        DispatchTargets, FeedConfig, FeedIdentity, FeedIngest, FeedTarget, FeederError,
        PollSourceConfig, SourceConfig, StreamSourceConfig, TrackRecord, UdpTarget,
    };
    use feed_worker::{FeedWorker, WorkerState};

    struct RecordingIngest {
        sent: Mutex<Vec<(String, String)>>,
    }

    impl RecordingIngest {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
            })
        }

        fn sent(&self) -> Vec<(String, String)> {
            self.sent.lock().unwrap().clone()
        }
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
            self.sent
                .lock()
                .unwrap()
                .push((payload.to_string(), feed_id.to_string()));
            Ok(())
        }
    }

    fn feed_identity() -> FeedIdentity {
        FeedIdentity {
            id: "adsb-cot-feed".into(),
            name: "adsb-feed".into(),
            tags: vec!["adsb".into()],
        }
    }

    /// Serve the same canned HTTP JSON response to every request
    async fn spawn_json_endpoint(body: &'static str) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                tokio::spawn(async move {
                    let mut buf = [0u8; 2048];
                    let _ = socket.read(&mut buf).await;
                    let response = format!(
                        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });
        port
    }

    async fn wait_for<F: Fn() -> bool>(condition: F, what: &str) {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(3);
        while !condition() {
            assert!(tokio::time::Instant::now() < deadline, "timed out waiting for {what}");
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    fn valid_line() -> String {
        let record = TrackRecord {
            hex: "abc123".to_string(),
            lat: 40.0,
            lon: -73.0,
            alt_baro: 1000.0,
            track: 90.0,
            vel: 200.0,
            flight: "UAL1".to_string(),
        };
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        cot::encode_track(&record, now).to_xml()
    }

    /// End-to-end test: poll endpoint → encoder → feed sink
    #[tokio::test]
    async fn test_e2e_poll_pipeline() {
        let port = spawn_json_endpoint(
            r#"{"aircraft":[{"hex":"abc123","lat":40.0,"lon":-73.0,"alt_baro":1000,"track":90,"vel":200,"flight":"UAL1"}]}"#,
        )
        .await;

        let config = FeedConfig {
            feed: feed_identity(),
            source: SourceConfig::Poll(PollSourceConfig {
                url: format!("http://127.0.0.1:{port}/data.json"),
                interval_secs: 60,
            }),
            sinks: DispatchTargets {
                udp: None,
                feed: Some(FeedTarget::default()),
            },
        };

        let ingest = RecordingIngest::new();
        let mut worker = FeedWorker::new(config, ingest.clone());
        worker.start().await.unwrap();

        wait_for(|| !ingest.sent().is_empty(), "polled event").await;
        worker.stop().await.unwrap();

        let sent = ingest.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, "adsb-cot-feed");

        let event = cot::parse_cot(&sent[0].0).unwrap();
        assert_eq!(event.uid, "adsb-abc123");
        assert_eq!(event.detail.course, 90.0);
        assert_eq!(event.detail.speed, 200.0);
        assert_eq!(event.detail.callsign, "UAL1");
        assert_eq!(event.point.hae, 1000.0);
        assert_eq!(event.stale - event.start, chrono::Duration::seconds(60));
    }

    /// Poll mode with an empty aircraft array produces nothing and no error
    #[tokio::test]
    async fn test_e2e_poll_empty_array() {
        let port = spawn_json_endpoint(r#"{"aircraft":[]}"#).await;

        let config = FeedConfig {
            feed: feed_identity(),
            source: SourceConfig::Poll(PollSourceConfig {
                url: format!("http://127.0.0.1:{port}/data.json"),
                interval_secs: 60,
            }),
            sinks: DispatchTargets {
                udp: None,
                feed: Some(FeedTarget::default()),
            },
        };

        let ingest = RecordingIngest::new();
        let mut worker = FeedWorker::new(config, ingest.clone());
        worker.start().await.unwrap();

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(worker.state(), WorkerState::Running, "empty fetch is not an error");
        worker.stop().await.unwrap();

        assert!(ingest.sent().is_empty());
    }

    /// End-to-end test: stream lines → UDP sink and feed sink, with a
    /// malformed line skipped in between
    #[tokio::test]
    async fn test_e2e_stream_dual_sink() {
        let udp_receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let udp_port = udp_receiver.local_addr().unwrap().port();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let stream_port = listener.local_addr().unwrap().port();

        let line = valid_line();
        let payload = format!("{line}\nnot a cot event\n{line}\n");
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket.write_all(payload.as_bytes()).await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let config = FeedConfig {
            feed: feed_identity(),
            source: SourceConfig::Stream(StreamSourceConfig {
                host: "127.0.0.1".into(),
                port: stream_port,
                command: None,
            }),
            sinks: DispatchTargets {
                udp: Some(UdpTarget {
                    host: "127.0.0.1".into(),
                    port: udp_port,
                }),
                feed: Some(FeedTarget::default()),
            },
        };

        let ingest = RecordingIngest::new();
        let mut worker = FeedWorker::new(config, ingest.clone());
        worker.start().await.unwrap();

        wait_for(|| ingest.sent().len() == 2, "both valid lines").await;

        // The same two events arrived as datagrams, in order
        let mut buf = [0u8; 4096];
        for _ in 0..2 {
            let len = tokio::time::timeout(Duration::from_secs(2), udp_receiver.recv(&mut buf))
                .await
                .expect("datagram must arrive")
                .unwrap();
            assert_eq!(&buf[..len], line.as_bytes());
        }

        worker.stop().await.unwrap();

        // Pass-through lines keep the feed-assigned identity and raw payload
        let sent = ingest.sent();
        assert_eq!(sent[0].0, line);
        assert_eq!(sent[0].1, "adsb-cot-feed");
    }

    /// Adapter-level flow without the worker: poll variant feeding a channel
    #[tokio::test]
    async fn test_source_adapter_poll_variant() {
        let port = spawn_json_endpoint(
            r#"{"aircraft":[{"hex":"def456","lat":1.0,"lon":2.0}]}"#,
        )
        .await;

        let config = FeedConfig {
            feed: feed_identity(),
            source: SourceConfig::Poll(PollSourceConfig {
                url: format!("http://127.0.0.1:{port}/data.json"),
                interval_secs: 60,
            }),
            sinks: DispatchTargets::default(),
        };

        let adapter = ingestion::SourceAdapter::from_config(&config);
        assert_eq!(adapter.name(), "poll");

        let (tx, mut rx) = tokio::sync::mpsc::channel(16);
        let cancel = tokio_util::sync::CancellationToken::new();
        let handle = tokio::spawn(adapter.run(tx, cancel.clone()));

        let envelope = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("envelope must arrive")
            .unwrap();
        assert_eq!(envelope.uid, "adsb-def456");

        cancel.cancel();
        handle.await.unwrap().unwrap();
    }

    /// Dispatcher-level fan-out with the diagnostic log sink
    #[tokio::test]
    async fn test_dispatcher_with_log_sink() {
        let mut dispatcher =
            dispatcher::Dispatcher::with_sinks(vec![Box::new(dispatcher::LogSink::new("log"))]);

        let envelope = contracts::EventEnvelope::new("adsb-abc123", valid_line());
        let report = dispatcher.dispatch(&envelope).await;
        assert_eq!(report.attempted(), 1);
        assert!(report.all_ok());
        dispatcher.close().await;
    }

    /// Config file text drives the same pipeline the typed config does
    #[tokio::test]
    async fn test_e2e_config_loader_to_worker() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let stream_port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let toml = format!(
            r#"
[feed]
id = "adsb-cot-feed"

[source]
mode = "stream"
host = "127.0.0.1"
port = {stream_port}

[sinks.feed]
"#
        );
        let config =
            config_loader::ConfigLoader::load_from_str(&toml, config_loader::ConfigFormat::Toml)
                .unwrap();

        let mut worker = FeedWorker::new(config, RecordingIngest::new());
        worker.start().await.unwrap();
        assert_eq!(worker.state(), WorkerState::Running);
        worker.stop().await.unwrap();
        assert_eq!(worker.state(), WorkerState::Stopped);
    }
}
