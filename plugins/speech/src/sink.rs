use hearsay_session::{Envelope, ResultSink, SinkError};
use tauri::ipc::Channel;

/// Delivers envelopes over a frontend IPC channel.
pub struct IpcSink {
    channel: Channel<Envelope>,
}

impl IpcSink {
    pub fn new(channel: Channel<Envelope>) -> Self {
        Self { channel }
    }
}

impl ResultSink for IpcSink {
    fn deliver(&self, envelope: Envelope) -> std::result::Result<(), SinkError> {
        self.channel
            .send(envelope)
            .map_err(|e| SinkError::Failed(e.to_string()))
    }
}
