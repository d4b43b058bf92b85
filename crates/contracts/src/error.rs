//! Layered error definitions
//!
//! Categorized by source: config / source / sink / feed ingest

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum FeederError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Source Errors =====
    /// Upstream connection error
    #[error("source connection error to {endpoint}: {message}")]
    SourceConnection { endpoint: String, message: String },

    /// Track record decode error
    #[error("track decode error for '{identity}': {message}")]
    TrackDecode { identity: String, message: String },

    // ===== Sink Errors =====
    /// Sink write error
    #[error("sink '{sink_name}' write error: {message}")]
    SinkWrite { sink_name: String, message: String },

    /// Sink connection error
    #[error("sink '{sink_name}' connection error: {message}")]
    SinkConnection { sink_name: String, message: String },

    // ===== Feed Ingest Errors =====
    /// Feed ingest API call error
    #[error("feed ingest error for feed '{feed_id}': {message}")]
    FeedIngest { feed_id: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl FeederError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create source connection error
    pub fn source_connection(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceConnection {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create track decode error
    pub fn track_decode(identity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TrackDecode {
            identity: identity.into(),
            message: message.into(),
        }
    }

    /// Create sink write error
    pub fn sink_write(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkWrite {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }

    /// Create sink connection error
    pub fn sink_connection(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkConnection {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }

    /// Create feed ingest error
    pub fn feed_ingest(feed_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FeedIngest {
            feed_id: feed_id.into(),
            message: message.into(),
        }
    }
}
