//! Translation of platform listener callbacks into typed signals.
//!
//! Platform engines report through callbacks that may fire on any thread.
//! [`EngineListener`] turns each callback into an [`EngineSignal`] and queues it
//! for the single task that owns the session, so the engine is only ever
//! driven from that task.

use crate::{ErrorCode, RecognitionEvent};
use tokio::sync::mpsc;

/// A listener callback, tagged with the engine instance it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSignal {
    /// Listener generation; bumps each time an engine instance is recreated.
    pub generation: u64,
    pub kind: SignalKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SignalKind {
    Event(RecognitionEvent),
    /// A final-results callback that carried no candidate list.
    ///
    /// Reported to the caller as an error delivery rather than as an empty
    /// transcript list, so a broken engine bundle is distinguishable from
    /// silence. The session still restarts afterwards.
    Fault(String),
}

/// Callback sink handed to an engine instance.
#[derive(Debug, Clone)]
pub struct EngineListener {
    generation: u64,
    tx: mpsc::UnboundedSender<EngineSignal>,
}

impl EngineListener {
    pub fn new(generation: u64, tx: mpsc::UnboundedSender<EngineSignal>) -> Self {
        Self { generation, tx }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn on_ready_for_speech(&self) {
        self.emit(RecognitionEvent::Ready);
    }

    pub fn on_beginning_of_speech(&self) {
        self.emit(RecognitionEvent::BeginSpeech);
    }

    pub fn on_end_of_speech(&self) {
        self.emit(RecognitionEvent::EndSpeech);
    }

    pub fn on_rms_changed(&self, rms_db: f32) {
        self.emit(RecognitionEvent::VolumeChanged(rms_db));
    }

    /// A missing candidate list is treated as an empty batch.
    pub fn on_partial_results(&self, matches: Option<Vec<String>>) {
        tracing::trace!(?matches, "partial results");
        self.emit(RecognitionEvent::PartialResult(matches.unwrap_or_default()));
    }

    /// `None` (no candidate list in the bundle) becomes [`SignalKind::Fault`],
    /// not an empty [`RecognitionEvent::FinalResult`].
    pub fn on_results(&self, matches: Option<Vec<String>>) {
        tracing::debug!(?matches, "final results");
        match matches {
            Some(matches) => self.emit(RecognitionEvent::FinalResult(matches)),
            None => self.send(SignalKind::Fault(
                "results bundle did not contain recognition candidates".to_string(),
            )),
        }
    }

    /// `code` is the platform's integer error code.
    pub fn on_error(&self, code: i32) {
        let code = ErrorCode::from_platform_code(code);
        tracing::debug!(?code, "engine error");
        self.emit(RecognitionEvent::Error(code));
    }

    pub fn emit(&self, event: RecognitionEvent) {
        self.send(SignalKind::Event(event));
    }

    fn send(&self, kind: SignalKind) {
        let signal = EngineSignal {
            generation: self.generation,
            kind,
        };
        if self.tx.send(signal).is_err() {
            tracing::debug!(generation = self.generation, "session closed, dropping signal");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listener(generation: u64) -> (EngineListener, mpsc::UnboundedReceiver<EngineSignal>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (EngineListener::new(generation, tx), rx)
    }

    #[test]
    fn test_callbacks_are_tagged_with_generation() {
        let (listener, mut rx) = listener(3);
        listener.on_ready_for_speech();
        listener.on_error(8);

        let first = rx.try_recv().unwrap();
        assert_eq!(first.generation, 3);
        assert_eq!(first.kind, SignalKind::Event(RecognitionEvent::Ready));

        let second = rx.try_recv().unwrap();
        assert_eq!(
            second.kind,
            SignalKind::Event(RecognitionEvent::Error(ErrorCode::Busy))
        );
    }

    #[test]
    fn test_missing_partials_become_empty_batch() {
        let (listener, mut rx) = listener(0);
        listener.on_partial_results(None);
        assert_eq!(
            rx.try_recv().unwrap().kind,
            SignalKind::Event(RecognitionEvent::PartialResult(Vec::new()))
        );
    }

    #[test]
    fn test_missing_final_results_is_a_fault() {
        let (listener, mut rx) = listener(0);
        listener.on_results(None);
        assert!(matches!(rx.try_recv().unwrap().kind, SignalKind::Fault(_)));

        listener.on_results(Some(vec!["hello".to_string()]));
        assert_eq!(
            rx.try_recv().unwrap().kind,
            SignalKind::Event(RecognitionEvent::FinalResult(vec!["hello".to_string()]))
        );
    }

    #[tokio::test]
    async fn test_callbacks_from_other_threads() {
        let (listener, mut rx) = listener(1);
        let remote = listener.clone();
        std::thread::spawn(move || remote.on_rms_changed(-4.5))
            .join()
            .unwrap();

        let signal = rx.recv().await.unwrap();
        assert_eq!(
            signal.kind,
            SignalKind::Event(RecognitionEvent::VolumeChanged(-4.5))
        );
    }

    #[test]
    fn test_send_after_receiver_dropped_is_silent() {
        let (listener, rx) = listener(0);
        drop(rx);
        listener.on_end_of_speech();
    }
}
