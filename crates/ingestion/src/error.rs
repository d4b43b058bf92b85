//! Ingestion error types

use thiserror::Error;

/// Fatal source errors.
///
/// Everything transient (malformed lines, failed fetch cycles, bad entries)
/// is absorbed and logged where it is detected; only conditions that end the
/// event sequence surface here.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Could not open the upstream connection
    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    /// The upstream closed the connection while the worker was still running
    #[error("stream from {endpoint} closed by peer")]
    StreamClosed { endpoint: String },

    /// Read failure on the upstream connection
    #[error("read error on stream from {endpoint}: {source}")]
    Read {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    /// Create a connect error
    pub fn connect(endpoint: impl Into<String>, source: std::io::Error) -> Self {
        Self::Connect {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Create a stream-closed error
    pub fn closed(endpoint: impl Into<String>) -> Self {
        Self::StreamClosed {
            endpoint: endpoint.into(),
        }
    }

    /// Create a read error
    pub fn read(endpoint: impl Into<String>, source: std::io::Error) -> Self {
        Self::Read {
            endpoint: endpoint.into(),
            source,
        }
    }
}
