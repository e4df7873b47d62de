//! Tauri bridge for the hearsay speech session.
//!
//! Results of a `start_listening` call stream back through the IPC channel
//! passed as `onResult`; each message carries `keepOpen` so the frontend knows
//! whether more will follow.

use hearsay_engine::UnavailableEngine;
use hearsay_session::{SpeechPlatform, SpeechService};
use std::sync::Arc;
use tauri::{
    plugin::{Builder, TauriPlugin},
    Manager, Runtime,
};

mod commands;
mod error;
mod sink;

pub use error::{Result, SpeechError};
pub use hearsay_session::SessionState;
pub use sink::IpcSink;

const PLUGIN_NAME: &str = "hearsay-speech";

/// Register the plugin with the given platform adapters.
pub fn init<R: Runtime>(platform: SpeechPlatform) -> TauriPlugin<R> {
    Builder::new(PLUGIN_NAME)
        .invoke_handler(tauri::generate_handler![
            commands::is_recognition_available,
            commands::start_listening,
            commands::stop_listening,
            commands::get_supported_languages,
            commands::has_permission,
            commands::request_permission,
            commands::session_state,
        ])
        .setup(move |app, _api| {
            tracing::info!(package = %platform.package_name, "initializing speech plugin");
            let (service, task) = SpeechService::new(platform);
            tauri::async_runtime::spawn(task.run());
            app.manage(service);
            Ok(())
        })
        .on_drop(|app| {
            if let Some(service) = app.try_state::<SpeechService>() {
                service.shutdown();
            }
        })
        .build()
}

/// Register the plugin on a host without a recognition service. Every start
/// request fails with "not available".
pub fn init_unsupported<R: Runtime>(package_name: impl Into<String>) -> TauriPlugin<R> {
    init(SpeechPlatform::headless(
        package_name,
        Arc::new(UnavailableEngine),
    ))
}
