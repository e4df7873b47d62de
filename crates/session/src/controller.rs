//! The recognition session state machine.
//!
//! One `SessionController` owns the engine instance and the result channel.
//! It is driven synchronously: callers invoke `start`/`stop`, and every engine
//! callback is fed in through `handle_signal` from the same execution context.
//! [`crate::SpeechService`] provides that context as a single tokio task.
//!
//! After every final result and every error the controller starts listening
//! again, turning one start request into continuous dictation until `stop` is
//! called or the host app leaves the foreground.

use crate::buffer::PartialResultBuffer;
use crate::error::{Result, SessionError};
use crate::sink::{Delivery, ResultChannel, ResultSinkRef};
use crate::state::SessionState;
use hearsay_engine::{
    EngineFactory, EngineListener, EngineOptions, EngineSignal, RecognitionConfig,
    RecognitionEngine, RecognitionEvent, RecognizerUi, RecoveryAction, SignalKind, UiOutcome,
};
use hearsay_platform::{AudioMuteController, Capability, ForegroundGuard, PermissionGate};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

const SUPERSEDED_MESSAGE: &str = "Session superseded by a new start request";

/// Collaborators the controller drives.
#[derive(Clone)]
pub struct ControllerDeps {
    pub engines: Arc<dyn EngineFactory>,
    pub ui: Arc<dyn RecognizerUi>,
    pub permissions: PermissionGate,
    pub foreground: ForegroundGuard,
    pub audio: AudioMuteController,
}

pub struct SessionController {
    deps: ControllerDeps,
    signals: mpsc::UnboundedSender<EngineSignal>,
    state: SessionState,
    engine: Option<Box<dyn RecognitionEngine>>,
    /// Generation of the listener bound to the current engine instance.
    generation: u64,
    config: Option<RecognitionConfig>,
    options: Option<EngineOptions>,
    partials: PartialResultBuffer,
    channel: Option<ResultChannel>,
    awaiting_ui: bool,
    /// Whether system streams are currently muted by this controller.
    muted: bool,
    session_id: Option<Uuid>,
}

impl SessionController {
    /// `signals` is where listeners of engines created by this controller send.
    pub fn new(deps: ControllerDeps, signals: mpsc::UnboundedSender<EngineSignal>) -> Self {
        Self {
            deps,
            signals,
            state: SessionState::Idle,
            engine: None,
            generation: 0,
            config: None,
            options: None,
            partials: PartialResultBuffer::new(),
            channel: None,
            awaiting_ui: false,
            muted: false,
            session_id: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Generation of the current listener; signals from older ones are ignored.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_recognition_available(&self) -> bool {
        self.deps.engines.is_available()
    }

    /// Start a session.
    ///
    /// Fails without touching engine or sink when the engine is unavailable or
    /// the microphone permission is missing. A session that is still active,
    /// or whose recognizer UI is still open, is closed before the new one
    /// starts. Any existing engine instance is replaced, so callbacks left over
    /// from earlier sessions are never attributed to this one.
    pub fn start(&mut self, config: RecognitionConfig, sink: ResultSinkRef) -> Result<()> {
        if !self.deps.engines.is_available() {
            return Err(SessionError::NotAvailable);
        }
        if !self.deps.permissions.granted(Capability::RecordAudio) {
            return Err(SessionError::MissingPermission);
        }

        if self.state.is_active() || self.awaiting_ui {
            self.supersede();
        }
        self.retire_engine();

        let session_id = Uuid::new_v4();
        tracing::info!(
            %session_id,
            language = config.language(),
            max_results = config.max_results(),
            partials = config.show_partial_results(),
            present_ui = config.present_ui(),
            "starting recognition session"
        );

        let options = EngineOptions::from_config(&config, self.deps.foreground.package_name());
        self.partials.reset();
        self.session_id = Some(session_id);
        self.channel = Some(ResultChannel::new(sink));
        self.state = SessionState::AwaitingStart;

        if config.present_ui() {
            if let Err(e) = self.deps.ui.present(&options) {
                tracing::warn!(error = %e, "failed to present recognizer UI");
                self.channel = None;
                self.state = SessionState::Stopped;
                return Err(e.into());
            }
            self.awaiting_ui = true;
            self.config = Some(config);
            self.options = Some(options);
            return Ok(());
        }

        self.awaiting_ui = false;
        self.config = Some(config);
        self.options = Some(options);
        self.resume_listening();
        Ok(())
    }

    /// Stop capturing. Always succeeds, whether or not a session is active.
    ///
    /// The result channel stays bound so a late final result still reaches the
    /// caller; it will not trigger a restart. A pending recognizer UI is left
    /// alone and still answers with its terminal delivery.
    pub fn stop(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            if let Err(e) = engine.stop_listening() {
                tracing::warn!(error = %e, "engine stop failed");
            }
        }
        self.unmute();
        if self.state != SessionState::Idle || self.session_id.is_some() {
            tracing::info!(session_id = ?self.session_id, "recognition session stopped");
        }
        self.state = SessionState::Stopped;
    }

    /// Route one listener signal.
    pub fn handle_signal(&mut self, signal: EngineSignal) {
        if self.awaiting_ui {
            tracing::debug!(
                generation = signal.generation,
                "recognizer UI pending, ignoring engine signal"
            );
            return;
        }
        if signal.generation != self.generation {
            tracing::trace!(
                generation = signal.generation,
                current = self.generation,
                "ignoring signal from replaced engine"
            );
            return;
        }

        match signal.kind {
            SignalKind::Event(event) => self.handle_event(event),
            SignalKind::Fault(message) => {
                tracing::warn!(%message, "malformed engine results");
                self.send_non_terminal(Delivery::error(message));
                if self.state.is_active() {
                    self.restart();
                }
            }
        }
    }

    pub fn handle_event(&mut self, event: RecognitionEvent) {
        if event.drives_transition() {
            tracing::debug!(?event, state = %self.state, "engine event");
        }

        match event {
            RecognitionEvent::Ready => {
                if !self.state.is_active() {
                    tracing::debug!(state = %self.state, "ready outside active session, ignoring");
                    return;
                }
                self.mute();
                self.state = SessionState::Listening;
            }
            RecognitionEvent::PartialResult(candidates) => self.on_partial(candidates),
            RecognitionEvent::FinalResult(candidates) => {
                self.send_non_terminal(Delivery::transcripts(candidates));
                if self.state.is_active() {
                    self.restart();
                }
            }
            RecognitionEvent::Error(code) => {
                if !self.state.is_active() {
                    tracing::debug!(
                        ?code,
                        state = %self.state,
                        "error outside active session, ignoring"
                    );
                    return;
                }
                self.send_non_terminal(Delivery::error(code.message()));
                self.recover(code.recovery());
                self.restart();
            }
            RecognitionEvent::BeginSpeech
            | RecognitionEvent::EndSpeech
            | RecognitionEvent::VolumeChanged(_) => {
                tracing::trace!(?event, "informational engine event");
            }
        }
    }

    /// Outcome of the host-presented recognizer UI. Always a terminal delivery.
    pub fn handle_ui_outcome(&mut self, outcome: UiOutcome) {
        if !self.awaiting_ui {
            tracing::warn!(?outcome, "recognizer UI outcome without a pending UI session");
            return;
        }
        self.awaiting_ui = false;

        let delivery = match outcome {
            UiOutcome::Matches(matches) => Delivery::transcripts(matches),
            UiOutcome::Failed { result_code } => Delivery::error(result_code.to_string()),
        };
        if let Some(channel) = self.channel.as_mut() {
            channel.send_terminal(delivery);
        }
        self.state = SessionState::Stopped;
    }

    /// Release the engine instance. Used when the owning task exits.
    pub fn shutdown(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.destroy();
        }
        self.unmute();
        self.state = SessionState::Stopped;
    }

    fn on_partial(&mut self, candidates: Vec<String>) {
        let enabled = self
            .config
            .as_ref()
            .is_some_and(RecognitionConfig::show_partial_results);
        if !enabled {
            return;
        }
        if self.partials.offer(&candidates) {
            self.send_non_terminal(Delivery::transcripts(candidates));
        }
    }

    fn restart(&mut self) {
        self.state = SessionState::RestartPending;
        self.resume_listening();
    }

    /// Start a listening cycle if the host app is in front; otherwise give the
    /// user their audio back and halt the loop.
    fn resume_listening(&mut self) {
        if !self.deps.foreground.is_foreground() {
            tracing::info!("host app not in foreground, not restarting recognition");
            self.deps.audio.unmute();
            self.muted = false;
            self.state = SessionState::Stopped;
            return;
        }

        let Some(options) = self.options.clone() else {
            tracing::warn!("no engine options, cannot start listening");
            self.state = SessionState::Stopped;
            return;
        };

        let started = self
            .ensure_engine()
            .and_then(|engine| engine.start_listening(&options));

        match started {
            Ok(()) => self.state = SessionState::AwaitingStart,
            Err(e) => {
                tracing::warn!(error = %e, "failed to start listening");
                self.send_non_terminal(Delivery::error(e.to_string()));
                self.state = SessionState::Stopped;
            }
        }
    }

    fn recover(&mut self, action: RecoveryAction) {
        match action {
            RecoveryAction::None => {}
            RecoveryAction::CancelSession => {
                if let Some(engine) = self.engine.as_mut() {
                    tracing::debug!("cancelling busy engine session");
                    if let Err(e) = engine.cancel() {
                        tracing::warn!(error = %e, "engine cancel failed");
                    }
                }
            }
            RecoveryAction::RecreateEngine => {
                tracing::debug!(generation = self.generation, "recreating engine");
                self.mute();
                if let Some(mut engine) = self.engine.take() {
                    engine.destroy();
                }
                if let Err(e) = self.ensure_engine() {
                    tracing::warn!(error = %e, "failed to recreate engine");
                }
            }
        }
    }

    fn ensure_engine(&mut self) -> hearsay_engine::Result<&mut Box<dyn RecognitionEngine>> {
        if self.engine.is_none() {
            self.generation += 1;
            let listener = EngineListener::new(self.generation, self.signals.clone());
            let engine = self.deps.engines.create(listener)?;
            tracing::debug!(generation = self.generation, "engine instance created");
            self.engine = Some(engine);
        }
        match self.engine.as_mut() {
            Some(engine) => Ok(engine),
            None => Err(hearsay_engine::EngineError::Unavailable),
        }
    }

    /// Cancel and release the engine instance; the next silent start creates
    /// a fresh one under a new listener generation.
    fn retire_engine(&mut self) {
        let Some(mut engine) = self.engine.take() else {
            return;
        };
        tracing::debug!(generation = self.generation, "retiring engine instance");
        if let Err(e) = engine.cancel() {
            tracing::warn!(error = %e, "engine cancel failed");
        }
        engine.destroy();
    }

    fn mute(&mut self) {
        self.deps.audio.mute();
        self.muted = true;
    }

    /// Give streams back if this controller muted them.
    fn unmute(&mut self) {
        if self.muted {
            self.deps.audio.unmute();
            self.muted = false;
        }
    }

    fn supersede(&mut self) {
        tracing::info!(session_id = ?self.session_id, "superseding active session");
        if let Some(mut channel) = self.channel.take() {
            channel.send_terminal(Delivery::error(SUPERSEDED_MESSAGE));
        }
        self.awaiting_ui = false;
    }

    fn send_non_terminal(&mut self, delivery: Delivery) {
        match self.channel.as_mut() {
            Some(channel) => {
                channel.send_non_terminal(delivery);
            }
            None => tracing::debug!(?delivery, "no result channel bound, dropping delivery"),
        }
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("has_engine", &self.engine.is_some())
            .field("awaiting_ui", &self.awaiting_ui)
            .field("muted", &self.muted)
            .field("session_id", &self.session_id)
            .finish_non_exhaustive()
    }
}
