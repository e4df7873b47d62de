use serde::Serialize;

/// Lifecycle of the single recognition session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No session has been started yet.
    #[default]
    Idle,
    /// A start was issued; waiting for the engine (or the UI) to respond.
    AwaitingStart,
    /// The engine is ready and capturing.
    Listening,
    /// A cycle ended; a restart is being arranged.
    RestartPending,
    /// Explicitly stopped, halted by the foreground guard, or finished.
    Stopped,
}

impl SessionState {
    /// Whether the session is still cycling and restarts are allowed.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            Self::AwaitingStart | Self::Listening | Self::RestartPending
        )
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::AwaitingStart => "awaiting_start",
            Self::Listening => "listening",
            Self::RestartPending => "restart_pending",
            Self::Stopped => "stopped",
        };
        f.write_str(name)
    }
}
