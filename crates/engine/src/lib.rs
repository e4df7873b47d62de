//! Contracts for the platform speech-recognition engine.
//!
//! The engine itself is an opaque platform service. This crate defines the
//! pieces the session layer talks to:
//! - [`RecognitionConfig`] and [`EngineOptions`], the values handed to the engine
//! - [`RecognitionEvent`] and [`ErrorCode`], the typed event stream it emits
//! - [`EngineListener`], which turns platform callbacks into that stream
//! - [`RecognitionEngine`], [`EngineFactory`] and [`RecognizerUi`], the seams
//!   platform adapters implement

mod config;
mod engine;
mod event;
mod listener;

pub use config::{
    ConfigError, EngineOptions, LanguageModel, RecognitionConfig, RecognitionConfigBuilder,
    StartRequest, DEFAULT_MAX_RESULTS,
};
pub use engine::{
    EngineFactory, NoRecognizerUi, RecognitionEngine, RecognizerUi, UiOutcome, UnavailableEngine,
};
pub use event::{ErrorCode, RecognitionEvent, RecoveryAction};
pub use listener::{EngineListener, EngineSignal, SignalKind};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("speech recognition engine is not available")]
    Unavailable,
    #[error("failed to create recognition engine: {0}")]
    CreateFailed(String),
    #[error("engine call failed: {0}")]
    CallFailed(String),
    #[error("recognizer UI could not be presented: {0}")]
    UiFailed(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
