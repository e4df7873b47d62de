//! Recognition session for hearsay.
//!
//! Owns the single listening session between a caller and the platform
//! recognizer:
//!
//! ```text
//! caller ──► SpeechService ──cmd──► SessionTask ──► SessionController ──► RecognitionEngine
//!                                        ▲                  │
//!                        EngineListener ─┘                  └──► ResultChannel ──► ResultSink
//! ```
//!
//! A started session keeps restarting itself after every final result and
//! every engine error (always-on dictation) until it is stopped or the host
//! app leaves the foreground.
//!
//! # Example
//!
//! ```ignore
//! let service = SpeechService::spawn(platform);
//! let (sink, mut deliveries) = ChannelSink::new();
//!
//! let request = StartRequest {
//!     present_ui: Some(false),
//!     ..Default::default()
//! };
//! service.start_listening(request, Arc::new(sink)).await?;
//!
//! while let Some(envelope) = deliveries.recv().await {
//!     println!("{:?}", envelope.delivery);
//! }
//! ```

mod buffer;
mod controller;
mod error;
mod service;
mod sink;
mod state;

pub use buffer::PartialResultBuffer;
pub use controller::{ControllerDeps, SessionController};
pub use error::{Result, SessionError};
pub use service::{SessionTask, SpeechPlatform, SpeechService, COMMAND_CHANNEL_CAPACITY};
pub use sink::{
    ChannelSink, Delivery, DeliveryStream, Envelope, ResultChannel, ResultSink, ResultSinkRef,
    SinkError,
};
pub use state::SessionState;
