//! EventEnvelope - the ready-to-dispatch unit
//!
//! Both source variants produce these: the stream source wraps each raw line
//! under the feed-assigned identity, the polled source wraps each rendered
//! event under the event's own identity.

use serde::{Deserialize, Serialize};

/// One situational-awareness event, rendered and ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Identity used for logging/diagnostics: the event uid for generated
    /// events, the feed identity for pass-through stream lines.
    pub uid: String,

    /// Rendered event payload text (one CoT event element).
    pub payload: String,
}

impl EventEnvelope {
    /// Create a new envelope
    pub fn new(uid: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            payload: payload.into(),
        }
    }
}
