use hearsay_engine::{ConfigError, EngineError};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Speech recognition service is not available on the system.")]
    NotAvailable,

    #[error("Missing permission")]
    MissingPermission,

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Speech session task is not running")]
    ServiceStopped,
}

pub type Result<T> = std::result::Result<T, SessionError>;
