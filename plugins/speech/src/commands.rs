use hearsay_engine::StartRequest;
use hearsay_session::{Envelope, SessionState, SpeechService};
use std::sync::Arc;
use tauri::{command, ipc::Channel, State};

use crate::error::Result;
use crate::sink::IpcSink;

#[command]
pub async fn is_recognition_available(service: State<'_, SpeechService>) -> Result<bool> {
    Ok(service.is_recognition_available())
}

#[command]
pub async fn start_listening(
    service: State<'_, SpeechService>,
    options: Option<StartRequest>,
    on_result: Channel<Envelope>,
) -> Result<()> {
    let sink = Arc::new(IpcSink::new(on_result));
    service
        .start_listening(options.unwrap_or_default(), sink)
        .await?;
    Ok(())
}

#[command]
pub async fn stop_listening(service: State<'_, SpeechService>) -> Result<()> {
    service.stop_listening().await;
    Ok(())
}

#[command]
pub async fn get_supported_languages(service: State<'_, SpeechService>) -> Result<Vec<String>> {
    Ok(service.get_supported_languages().await?)
}

#[command]
pub async fn has_permission(service: State<'_, SpeechService>) -> Result<bool> {
    Ok(service.has_permission())
}

#[command]
pub async fn request_permission(service: State<'_, SpeechService>) -> Result<()> {
    Ok(service.request_permission().await?)
}

#[command]
pub async fn session_state(service: State<'_, SpeechService>) -> Result<SessionState> {
    Ok(service.session_state().await?)
}
