//! UdpSink - UDP fire-and-forget delivery
//!
//! One unicast datagram per event, payload = UTF-8 rendered event text, no
//! framing beyond the datagram boundary. No delivery confirmation; a local
//! send error is recorded as that event's outcome and nothing more.

use async_trait::async_trait;
use tokio::net::UdpSocket;
use tracing::{debug, instrument, trace};

use contracts::{EventEnvelope, EventSink, FeederError, UdpTarget};

/// Sink that sends each event as a single UDP datagram
pub struct UdpSink {
    name: String,
    target: String,
    socket: Option<UdpSocket>,
}

impl UdpSink {
    /// Bind an ephemeral local socket and connect it to the target
    #[instrument(name = "udp_sink_connect", skip(name, target))]
    pub async fn connect(name: impl Into<String>, target: &UdpTarget) -> std::io::Result<Self> {
        let name = name.into();
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        socket.connect(target.address()).await?;

        debug!(sink = %name, target = %target.address(), "UdpSink connected");

        Ok(Self {
            name,
            target: target.address(),
            socket: Some(socket),
        })
    }

    fn socket(&self) -> Result<&UdpSocket, FeederError> {
        self.socket
            .as_ref()
            .ok_or_else(|| FeederError::sink_write(&self.name, "socket not connected"))
    }
}

#[async_trait]
impl EventSink for UdpSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&mut self, event: &EventEnvelope) -> Result<(), FeederError> {
        let socket = self.socket()?;
        let sent = socket
            .send(event.payload.as_bytes())
            .await
            .map_err(|e| FeederError::sink_write(&self.name, e.to_string()))?;
        trace!(sink = %self.name, uid = %event.uid, bytes = sent, "datagram sent");
        Ok(())
    }

    async fn close(&mut self) -> Result<(), FeederError> {
        self.socket = None;
        debug!(sink = %self.name, target = %self.target, "UdpSink closed");
        Ok(())
    }
}
