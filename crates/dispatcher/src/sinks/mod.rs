//! Sink implementations
//!
//! Contains UdpSink, FeedSink, and LogSink.

mod feed;
mod log;
mod udp;

pub use self::feed::FeedSink;
pub use self::log::LogSink;
pub use self::udp::UdpSink;
