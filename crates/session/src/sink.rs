//! Result delivery to the caller.
//!
//! A session owns exactly one outbound channel. Deliveries are either
//! non-terminal (the channel stays open for more) or terminal (the channel is
//! closed and later sends are dropped).

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Payload of one delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Delivery {
    /// Transcript candidates, most likely first.
    Transcripts { matches: Vec<String> },
    Error { message: String },
}

impl Delivery {
    pub fn transcripts(matches: Vec<String>) -> Self {
        Self::Transcripts { matches }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// A delivery plus whether the channel stays open after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde(flatten)]
    pub delivery: Delivery,
    pub keep_open: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("result channel closed by receiver")]
    Closed,
    #[error("result delivery failed: {0}")]
    Failed(String),
}

/// Transport for envelopes to the caller.
pub trait ResultSink: Send + Sync {
    fn deliver(&self, envelope: Envelope) -> Result<(), SinkError>;
}

pub type ResultSinkRef = Arc<dyn ResultSink>;

/// The session's view of its sink: explicit non-terminal and terminal sends.
pub struct ResultChannel {
    sink: ResultSinkRef,
    closed: bool,
}

impl ResultChannel {
    pub fn new(sink: ResultSinkRef) -> Self {
        Self {
            sink,
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns false if the channel was already closed or the sink failed.
    pub fn send_non_terminal(&mut self, delivery: Delivery) -> bool {
        self.send(delivery, true)
    }

    /// Send a final delivery and close the channel.
    pub fn send_terminal(&mut self, delivery: Delivery) -> bool {
        self.send(delivery, false)
    }

    fn send(&mut self, delivery: Delivery, keep_open: bool) -> bool {
        if self.closed {
            tracing::warn!(?delivery, "result channel already closed, dropping delivery");
            return false;
        }
        if !keep_open {
            self.closed = true;
        }

        match self.sink.deliver(Envelope {
            delivery,
            keep_open,
        }) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "failed to deliver result");
                false
            }
        }
    }
}

/// In-process sink backed by an unbounded channel.
#[derive(Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Envelope>,
}

/// Receiving half of a [`ChannelSink`].
pub struct DeliveryStream {
    rx: mpsc::UnboundedReceiver<Envelope>,
}

impl ChannelSink {
    pub fn new() -> (Self, DeliveryStream) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, DeliveryStream { rx })
    }
}

impl ResultSink for ChannelSink {
    fn deliver(&self, envelope: Envelope) -> Result<(), SinkError> {
        self.tx.send(envelope).map_err(|_| SinkError::Closed)
    }
}

impl DeliveryStream {
    pub async fn recv(&mut self) -> Option<Envelope> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<Envelope> {
        self.rx.try_recv().ok()
    }

    /// Everything delivered so far, without waiting.
    pub fn drain(&mut self) -> Vec<Envelope> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}
