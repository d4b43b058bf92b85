//! Configuration validation
//!
//! Rules:
//! - feed id non-empty
//! - stream host non-empty, port non-zero
//! - poll url non-empty, interval_secs > 0
//! - launch command, when present, non-blank
//! - udp target host non-empty, port non-zero

use contracts::{FeedConfig, FeederError, SourceConfig};

/// Validate a FeedConfig.
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &FeedConfig) -> Result<(), FeederError> {
    validate_feed(config)?;
    validate_source(config)?;
    validate_sinks(config)?;
    Ok(())
}

fn validate_feed(config: &FeedConfig) -> Result<(), FeederError> {
    if config.feed.id.trim().is_empty() {
        return Err(FeederError::config_validation(
            "feed.id",
            "feed id cannot be empty",
        ));
    }
    Ok(())
}

fn validate_source(config: &FeedConfig) -> Result<(), FeederError> {
    match &config.source {
        SourceConfig::Stream(stream) => {
            if stream.host.is_empty() {
                return Err(FeederError::config_validation(
                    "source.host",
                    "stream host cannot be empty",
                ));
            }
            if stream.port == 0 {
                return Err(FeederError::config_validation(
                    "source.port",
                    "stream port cannot be 0",
                ));
            }
            if let Some(command) = &stream.command {
                if command.split_whitespace().next().is_none() {
                    return Err(FeederError::config_validation(
                        "source.command",
                        "launch command cannot be blank",
                    ));
                }
            }
        }
        SourceConfig::Poll(poll) => {
            if poll.url.is_empty() {
                return Err(FeederError::config_validation(
                    "source.url",
                    "poll url cannot be empty",
                ));
            }
            if poll.interval_secs == 0 {
                return Err(FeederError::config_validation(
                    "source.interval_secs",
                    "poll interval must be > 0",
                ));
            }
        }
    }
    Ok(())
}

fn validate_sinks(config: &FeedConfig) -> Result<(), FeederError> {
    if let Some(udp) = &config.sinks.udp {
        if udp.host.is_empty() {
            return Err(FeederError::config_validation(
                "sinks.udp.host",
                "udp target host cannot be empty",
            ));
        }
        if udp.port == 0 {
            return Err(FeederError::config_validation(
                "sinks.udp.port",
                "udp target port cannot be 0",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{
        DispatchTargets, FeedIdentity, FeedTarget, PollSourceConfig, StreamSourceConfig,
        UdpTarget,
    };

    fn stream_config() -> FeedConfig {
        FeedConfig {
            feed: FeedIdentity {
                id: "adsb-cot-feed".into(),
                name: "adsb-feed".into(),
                tags: vec!["adsb".into()],
            },
            source: SourceConfig::Stream(StreamSourceConfig {
                host: "localhost".into(),
                port: 5000,
                command: None,
            }),
            sinks: DispatchTargets {
                udp: None,
                feed: Some(FeedTarget::default()),
            },
        }
    }

    fn poll_config() -> FeedConfig {
        FeedConfig {
            source: SourceConfig::Poll(PollSourceConfig {
                url: "https://api.adsb.lol/v2/mil".into(),
                interval_secs: 10,
            }),
            sinks: DispatchTargets {
                udp: Some(UdpTarget {
                    host: "239.2.3.1".into(),
                    port: 6969,
                }),
                feed: None,
            },
            ..stream_config()
        }
    }

    #[test]
    fn test_valid_configs() {
        assert!(validate(&stream_config()).is_ok());
        assert!(validate(&poll_config()).is_ok());
    }

    #[test]
    fn test_empty_feed_id() {
        let mut config = stream_config();
        config.feed.id = "  ".into();
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("feed id"), "got: {err}");
    }

    #[test]
    fn test_zero_stream_port() {
        let mut config = stream_config();
        config.source = SourceConfig::Stream(StreamSourceConfig {
            host: "localhost".into(),
            port: 0,
            command: None,
        });
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("port"), "got: {err}");
    }

    #[test]
    fn test_blank_command() {
        let mut config = stream_config();
        config.source = SourceConfig::Stream(StreamSourceConfig {
            host: "localhost".into(),
            port: 5000,
            command: Some("   ".into()),
        });
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("command"), "got: {err}");
    }

    #[test]
    fn test_zero_poll_interval() {
        let mut config = poll_config();
        config.source = SourceConfig::Poll(PollSourceConfig {
            url: "https://api.adsb.lol/v2/mil".into(),
            interval_secs: 0,
        });
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("interval"), "got: {err}");
    }

    #[test]
    fn test_empty_udp_host() {
        let mut config = poll_config();
        config.sinks.udp = Some(UdpTarget {
            host: String::new(),
            port: 6969,
        });
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("udp target host"), "got: {err}");
    }

    #[test]
    fn test_no_sinks_is_valid() {
        let mut config = stream_config();
        config.sinks = DispatchTargets::default();
        assert!(validate(&config).is_ok());
    }
}
