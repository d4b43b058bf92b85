//! FeedConfig - Config Loader output
//!
//! Describes one complete feed: identity, acquisition source, and dispatch
//! targets. Immutable once a worker starts; reconfiguration requires
//! stop/start.

use serde::{Deserialize, Serialize};

/// Complete configuration for one feed pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Feed identity in the downstream system
    pub feed: FeedIdentity,

    /// How telemetry arrives
    pub source: SourceConfig,

    /// Where events go
    #[serde(default)]
    pub sinks: DispatchTargets,
}

/// Identity of the downstream feed channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedIdentity {
    /// Feed identifier used when registering and delivering events
    pub id: String,

    /// Human-readable display name
    #[serde(default = "default_feed_name")]
    pub name: String,

    /// Tags attached at feed registration
    #[serde(default = "default_feed_tags")]
    pub tags: Vec<String>,
}

fn default_feed_name() -> String {
    "adsb-feed".to_string()
}

fn default_feed_tags() -> Vec<String> {
    vec!["adsb".to_string()]
}

/// Acquisition mode: persistent stream or periodic poll
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Read pre-encoded event lines from a persistent TCP connection
    Stream(StreamSourceConfig),

    /// Fetch raw track records from a remote HTTP endpoint on a cadence
    Poll(PollSourceConfig),
}

impl SourceConfig {
    /// Short mode label for logging
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Stream(_) => "stream",
            Self::Poll(_) => "poll",
        }
    }
}

/// Stream source parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamSourceConfig {
    /// Host running the event generator
    #[serde(default = "default_stream_host")]
    pub host: String,

    /// Port where the generator publishes event lines
    #[serde(default = "default_stream_port")]
    pub port: u16,

    /// Optional command to launch the generator as a child process
    #[serde(default)]
    pub command: Option<String>,
}

fn default_stream_host() -> String {
    "localhost".to_string()
}

fn default_stream_port() -> u16 {
    5000
}

impl StreamSourceConfig {
    /// `host:port` endpoint string
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Poll source parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollSourceConfig {
    /// Endpoint returning an aircraft.json document
    pub url: String,

    /// Delay between the end of one fetch and the start of the next
    #[serde(default = "default_poll_interval_secs")]
    pub interval_secs: u64,
}

fn default_poll_interval_secs() -> u64 {
    10
}

/// Dispatch targets: at most one datagram target and one named feed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchTargets {
    /// Outbound UDP unicast target
    #[serde(default)]
    pub udp: Option<UdpTarget>,

    /// Delivery into the downstream system's named feed channel
    #[serde(default)]
    pub feed: Option<FeedTarget>,
}

impl DispatchTargets {
    /// Number of configured targets
    pub fn count(&self) -> usize {
        usize::from(self.udp.is_some()) + usize::from(self.feed.is_some())
    }
}

/// UDP unicast target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UdpTarget {
    pub host: String,
    pub port: u16,
}

impl UdpTarget {
    /// `host:port` address string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Named-feed target. Presence enables delivery; the feed identity itself
/// lives in [`FeedIdentity`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedTarget {}
