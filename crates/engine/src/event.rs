use serde::Serialize;

/// Events emitted by the recognition engine during a listening cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionEvent {
    /// The engine is ready to receive speech.
    Ready,
    /// Interim candidates, most likely first.
    PartialResult(Vec<String>),
    /// Completed candidates for one utterance, most likely first.
    FinalResult(Vec<String>),
    Error(ErrorCode),
    BeginSpeech,
    EndSpeech,
    /// Input level in dB.
    VolumeChanged(f32),
}

impl RecognitionEvent {
    /// Whether the session state machine reacts to this event.
    pub fn drives_transition(&self) -> bool {
        matches!(
            self,
            Self::Ready | Self::PartialResult(_) | Self::FinalResult(_) | Self::Error(_)
        )
    }
}

/// Platform error reasons reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Audio,
    Client,
    InsufficientPermissions,
    Network,
    NetworkTimeout,
    NoMatch,
    Busy,
    Server,
    SpeechTimeout,
    Unknown,
}

/// What to do with the engine before listening resumes after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    None,
    /// Abort the engine's current session.
    CancelSession,
    /// Tear the engine down and build a fresh instance with a fresh listener.
    RecreateEngine,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 10] = [
        ErrorCode::Audio,
        ErrorCode::Client,
        ErrorCode::InsufficientPermissions,
        ErrorCode::Network,
        ErrorCode::NetworkTimeout,
        ErrorCode::NoMatch,
        ErrorCode::Busy,
        ErrorCode::Server,
        ErrorCode::SpeechTimeout,
        ErrorCode::Unknown,
    ];

    /// Map the platform's integer error code.
    pub fn from_platform_code(code: i32) -> Self {
        match code {
            1 => Self::NetworkTimeout,
            2 => Self::Network,
            3 => Self::Audio,
            4 => Self::Server,
            5 => Self::Client,
            6 => Self::SpeechTimeout,
            7 => Self::NoMatch,
            8 => Self::Busy,
            9 => Self::InsufficientPermissions,
            _ => Self::Unknown,
        }
    }

    /// Human-readable message delivered to the caller.
    pub fn message(self) -> &'static str {
        match self {
            Self::Audio => "Audio recording error",
            Self::Client => "Client side error",
            Self::InsufficientPermissions => "Insufficient permissions",
            Self::Network => "Network error",
            Self::NetworkTimeout => "Network timeout",
            Self::NoMatch => "No match",
            Self::Busy => "RecognitionService busy",
            Self::Server => "error from server",
            Self::SpeechTimeout => "No speech input",
            Self::Unknown => "Didn't understand, please try again.",
        }
    }

    pub fn recovery(self) -> RecoveryAction {
        match self {
            Self::Busy => RecoveryAction::CancelSession,
            Self::SpeechTimeout => RecoveryAction::RecreateEngine,
            _ => RecoveryAction::None,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
