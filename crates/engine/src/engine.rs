use crate::{EngineError, EngineListener, EngineOptions};

/// One instance of the platform recognizer.
///
/// Not thread-safe on the platform side: the session layer owns the instance
/// and calls it from a single task only.
pub trait RecognitionEngine: Send {
    /// Begin a listening cycle. Results arrive through the instance's listener.
    fn start_listening(&mut self, options: &EngineOptions) -> crate::Result<()>;

    /// Stop capturing; the engine may still deliver a final result.
    fn stop_listening(&mut self) -> crate::Result<()>;

    /// Abort the current cycle without delivering results.
    fn cancel(&mut self) -> crate::Result<()>;

    /// Release the instance. No further calls are made after this.
    fn destroy(&mut self);
}

/// Creates recognizer instances bound to a listener.
pub trait EngineFactory: Send + Sync {
    /// Whether a recognition service is installed on the system.
    fn is_available(&self) -> bool;

    fn create(&self, listener: EngineListener) -> crate::Result<Box<dyn RecognitionEngine>>;
}

/// Result of a host-presented recognizer UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiOutcome {
    Matches(Vec<String>),
    /// The UI finished with a non-OK result code (e.g. dismissed).
    Failed { result_code: i32 },
}

/// Host-presented recognition flow (the popup dialog variant).
///
/// `present` only launches the UI; the host reports the outcome back to the
/// session separately once the UI closes.
pub trait RecognizerUi: Send + Sync {
    fn present(&self, options: &EngineOptions) -> crate::Result<()>;
}

/// Factory for systems without a recognition service.
pub struct UnavailableEngine;

impl EngineFactory for UnavailableEngine {
    fn is_available(&self) -> bool {
        false
    }

    fn create(&self, _listener: EngineListener) -> crate::Result<Box<dyn RecognitionEngine>> {
        Err(EngineError::Unavailable)
    }
}

/// UI for hosts that cannot present a recognizer dialog.
pub struct NoRecognizerUi;

impl RecognizerUi for NoRecognizerUi {
    fn present(&self, _options: &EngineOptions) -> crate::Result<()> {
        Err(EngineError::UiFailed(
            "host does not provide a recognizer UI".to_string(),
        ))
    }
}
