use hearsay_platform::{LanguageError, PermissionError};
use hearsay_session::SessionError;
use serde::{Serialize, Serializer};

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Permission(#[from] PermissionError),

    #[error(transparent)]
    Language(#[from] LanguageError),
}

impl Serialize for SpeechError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SpeechError>;
