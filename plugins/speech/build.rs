fn main() {
    tauri_plugin::Builder::new(&[
        "is_recognition_available",
        "start_listening",
        "stop_listening",
        "get_supported_languages",
        "has_permission",
        "request_permission",
        "session_state",
    ])
    .build();
}
