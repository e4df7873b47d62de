//! Caller-facing speech service and the task that owns the session.
//!
//! All engine interaction happens on one task: commands from callers and
//! engine callbacks are both queued to it and handled strictly in order.

use crate::controller::{ControllerDeps, SessionController};
use crate::error::{Result, SessionError};
use crate::sink::ResultSinkRef;
use crate::state::SessionState;
use hearsay_engine::{
    EngineFactory, EngineSignal, NoRecognizerUi, RecognizerUi, StartRequest, UiOutcome,
};
use hearsay_platform::{
    AudioMuteController, Capability, ForegroundGuard, ForegroundProcess, GrantedPermissions,
    LanguageCatalog, LanguageError, LanguageSource, LocaleProvider, PermissionError,
    PermissionGate, PermissionPlatform, PlatformInfo, ProcessTable, StaticLanguages,
    SystemLocale, VolumeControl,
};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

/// Capacity of the caller command queue.
pub const COMMAND_CHANNEL_CAPACITY: usize = 32;

/// Platform adapters a service is built from.
#[derive(Clone)]
pub struct SpeechPlatform {
    /// Host application identifier; used for foreground checks and as the
    /// engine's calling package.
    pub package_name: String,
    pub info: PlatformInfo,
    pub engines: Arc<dyn EngineFactory>,
    pub ui: Arc<dyn RecognizerUi>,
    pub permissions: Arc<dyn PermissionPlatform>,
    pub volume: Option<Arc<dyn VolumeControl>>,
    pub processes: Arc<dyn ProcessTable>,
    pub languages: Arc<dyn LanguageSource>,
    pub locale: Arc<dyn LocaleProvider>,
}

impl SpeechPlatform {
    /// Adapters for a host that is always in front and needs no runtime
    /// permission: no recognizer UI, no volume control, no language list.
    pub fn headless(package_name: impl Into<String>, engines: Arc<dyn EngineFactory>) -> Self {
        let package_name = package_name.into();
        Self {
            processes: Arc::new(ForegroundProcess(package_name.clone())),
            package_name,
            info: PlatformInfo::default(),
            engines,
            ui: Arc::new(NoRecognizerUi),
            permissions: Arc::new(GrantedPermissions),
            volume: None,
            languages: Arc::new(StaticLanguages(Vec::new())),
            locale: Arc::new(SystemLocale),
        }
    }
}

enum Command {
    Start {
        request: StartRequest,
        sink: ResultSinkRef,
        reply: oneshot::Sender<Result<()>>,
    },
    Stop {
        reply: oneshot::Sender<()>,
    },
    UiOutcome(UiOutcome),
    State {
        reply: oneshot::Sender<SessionState>,
    },
}

/// Cloneable handle to the speech session.
#[derive(Clone)]
pub struct SpeechService {
    commands: mpsc::Sender<Command>,
    engines: Arc<dyn EngineFactory>,
    permissions: PermissionGate,
    languages: Arc<LanguageCatalog>,
    cancel_token: CancellationToken,
}

/// The task owning the [`SessionController`]. Run it with [`SessionTask::run`].
pub struct SessionTask {
    controller: SessionController,
    commands: mpsc::Receiver<Command>,
    signals: mpsc::UnboundedReceiver<EngineSignal>,
    locale: Arc<dyn LocaleProvider>,
    cancel_token: CancellationToken,
}

impl SpeechService {
    /// Build the service and its session task. The task must be spawned on a
    /// runtime before any async operation on the service completes.
    pub fn new(platform: SpeechPlatform) -> (Self, SessionTask) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        let cancel_token = CancellationToken::new();

        let permissions = PermissionGate::new(platform.permissions, platform.info);
        let deps = ControllerDeps {
            engines: Arc::clone(&platform.engines),
            ui: platform.ui,
            permissions: permissions.clone(),
            foreground: ForegroundGuard::new(platform.processes, platform.package_name),
            audio: AudioMuteController::new(platform.volume, platform.info),
        };

        let service = Self {
            commands: command_tx,
            engines: platform.engines,
            permissions,
            languages: Arc::new(LanguageCatalog::new(platform.languages)),
            cancel_token: cancel_token.clone(),
        };
        let task = SessionTask {
            controller: SessionController::new(deps, signal_tx),
            commands: command_rx,
            signals: signal_rx,
            locale: platform.locale,
            cancel_token,
        };

        (service, task)
    }

    /// Build the service and spawn its task on the current tokio runtime.
    pub fn spawn(platform: SpeechPlatform) -> Self {
        let (service, task) = Self::new(platform);
        tokio::spawn(task.run());
        service
    }

    pub fn is_recognition_available(&self) -> bool {
        self.engines.is_available()
    }

    /// Start a session; deliveries go to `sink` until the session is stopped.
    pub async fn start_listening(&self, request: StartRequest, sink: ResultSinkRef) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Start {
            request,
            sink,
            reply,
        })
        .await?;
        rx.await.map_err(|_| SessionError::ServiceStopped)?
    }

    /// Stop listening. Succeeds whether or not a session is active, and also
    /// when the session task has already exited.
    pub async fn stop_listening(&self) {
        let (reply, rx) = oneshot::channel();
        if self.send(Command::Stop { reply }).await.is_ok() {
            let _ = rx.await;
        }
    }

    pub async fn get_supported_languages(&self) -> std::result::Result<Vec<String>, LanguageError> {
        self.languages.supported_languages().await
    }

    pub fn has_permission(&self) -> bool {
        self.permissions.granted(Capability::RecordAudio)
    }

    pub async fn request_permission(&self) -> std::result::Result<(), PermissionError> {
        self.permissions.request(Capability::RecordAudio).await
    }

    /// Report the outcome of the host-presented recognizer UI.
    pub async fn complete_ui(&self, outcome: UiOutcome) -> Result<()> {
        self.send(Command::UiOutcome(outcome)).await
    }

    pub async fn session_state(&self) -> Result<SessionState> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::State { reply }).await?;
        rx.await.map_err(|_| SessionError::ServiceStopped)
    }

    /// Stop the session task; the engine instance is released on exit.
    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| SessionError::ServiceStopped)
    }
}

impl SessionTask {
    pub async fn run(mut self) {
        tracing::info!("speech session task started");

        loop {
            tokio::select! {
                biased;
                _ = self.cancel_token.cancelled() => {
                    tracing::info!("speech session task cancelled");
                    break;
                }
                command = self.commands.recv() => {
                    let Some(command) = command else {
                        tracing::info!("all service handles dropped");
                        break;
                    };
                    self.handle_command(command);
                }
                Some(signal) = self.signals.recv() => {
                    self.controller.handle_signal(signal);
                }
            }
        }

        self.controller.shutdown();
        tracing::info!("speech session task stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Start {
                request,
                sink,
                reply,
            } => {
                let locale = Arc::clone(&self.locale);
                let result = request
                    .into_config(|| locale.default_locale())
                    .map_err(SessionError::from)
                    .and_then(|config| self.controller.start(config, sink));
                if let Err(e) = &result {
                    tracing::warn!(error = %e, "start rejected");
                }
                let _ = reply.send(result);
            }
            Command::Stop { reply } => {
                self.controller.stop();
                let _ = reply.send(());
            }
            Command::UiOutcome(outcome) => self.controller.handle_ui_outcome(outcome),
            Command::State { reply } => {
                let _ = reply.send(self.controller.state());
            }
        }
    }
}
