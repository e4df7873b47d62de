//! Microphone permission checks and requests.

use crate::PlatformInfo;
use std::sync::Arc;
use tokio::sync::oneshot;

/// First platform version that grants permissions at runtime.
pub const RUNTIME_PERMISSIONS_API_LEVEL: u32 = 23;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    RecordAudio,
}

impl Capability {
    /// Platform identifier of the capability.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RecordAudio => "android.permission.RECORD_AUDIO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PermissionError {
    #[error("Permission denied")]
    Denied,
}

/// Completion handle for a permission dialog.
///
/// Dropping it without responding counts as a denial.
#[derive(Debug)]
pub struct PermissionResponder {
    tx: oneshot::Sender<PermissionStatus>,
}

impl PermissionResponder {
    pub fn respond(self, status: PermissionStatus) {
        if self.tx.send(status).is_err() {
            tracing::debug!(?status, "permission request abandoned before response");
        }
    }
}

/// Platform permission subsystem.
pub trait PermissionPlatform: Send + Sync {
    fn check(&self, capability: Capability) -> bool;

    /// Show the permission dialog; the outcome is reported through `responder`,
    /// possibly from another thread.
    fn request_dialog(&self, capability: Capability, responder: PermissionResponder);
}

/// Platform where every capability is granted up front.
pub struct GrantedPermissions;

impl PermissionPlatform for GrantedPermissions {
    fn check(&self, _capability: Capability) -> bool {
        true
    }

    fn request_dialog(&self, _capability: Capability, responder: PermissionResponder) {
        responder.respond(PermissionStatus::Granted);
    }
}

/// Answers and enforces capability grants.
#[derive(Clone)]
pub struct PermissionGate {
    platform: Arc<dyn PermissionPlatform>,
    info: PlatformInfo,
}

impl PermissionGate {
    pub fn new(platform: Arc<dyn PermissionPlatform>, info: PlatformInfo) -> Self {
        Self { platform, info }
    }

    /// Install-time permission platforms always report granted.
    pub fn granted(&self, capability: Capability) -> bool {
        if !self.info.has_runtime_permissions() {
            return true;
        }
        self.platform.check(capability)
    }

    /// Ask for `capability`, presenting the platform dialog only if needed.
    pub async fn request(&self, capability: Capability) -> Result<(), PermissionError> {
        if self.granted(capability) {
            return Ok(());
        }

        let (tx, rx) = oneshot::channel();
        tracing::info!(capability = capability.as_str(), "requesting permission");
        self.platform
            .request_dialog(capability, PermissionResponder { tx });

        match rx.await {
            Ok(PermissionStatus::Granted) => Ok(()),
            Ok(PermissionStatus::Denied) | Err(_) => {
                tracing::warn!(capability = capability.as_str(), "permission denied");
                Err(PermissionError::Denied)
            }
        }
    }
}

impl std::fmt::Debug for PermissionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionGate")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Dialog {
        granted: bool,
        answer: Option<PermissionStatus>,
        dialogs: AtomicUsize,
    }

    impl Dialog {
        fn new(granted: bool, answer: Option<PermissionStatus>) -> Arc<Self> {
            Arc::new(Self {
                granted,
                answer,
                dialogs: AtomicUsize::new(0),
            })
        }
    }

    impl PermissionPlatform for Dialog {
        fn check(&self, _capability: Capability) -> bool {
            self.granted
        }

        fn request_dialog(&self, _capability: Capability, responder: PermissionResponder) {
            self.dialogs.fetch_add(1, Ordering::SeqCst);
            if let Some(answer) = self.answer {
                std::thread::spawn(move || responder.respond(answer));
            }
        }
    }

    #[test]
    fn test_legacy_platform_always_granted() {
        let gate = PermissionGate::new(Dialog::new(false, None), PlatformInfo::new(22));
        assert!(gate.granted(Capability::RecordAudio));
    }

    #[test]
    fn test_runtime_platform_delegates_check() {
        let gate = PermissionGate::new(Dialog::new(false, None), PlatformInfo::new(23));
        assert!(!gate.granted(Capability::RecordAudio));
    }

    #[tokio::test]
    async fn test_request_when_granted_skips_dialog() {
        let platform = Dialog::new(true, None);
        let gate = PermissionGate::new(platform.clone(), PlatformInfo::new(30));

        assert_eq!(gate.request(Capability::RecordAudio).await, Ok(()));
        assert_eq!(platform.dialogs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_request_granted_by_dialog() {
        let platform = Dialog::new(false, Some(PermissionStatus::Granted));
        let gate = PermissionGate::new(platform.clone(), PlatformInfo::new(30));

        assert_eq!(gate.request(Capability::RecordAudio).await, Ok(()));
        assert_eq!(platform.dialogs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_request_denied_by_dialog() {
        let gate = PermissionGate::new(
            Dialog::new(false, Some(PermissionStatus::Denied)),
            PlatformInfo::new(30),
        );

        let err = gate.request(Capability::RecordAudio).await.unwrap_err();
        assert_eq!(err, PermissionError::Denied);
        assert_eq!(err.to_string(), "Permission denied");
    }

    #[tokio::test]
    async fn test_abandoned_dialog_is_denied() {
        let gate = PermissionGate::new(Dialog::new(false, None), PlatformInfo::new(30));
        assert_eq!(
            gate.request(Capability::RecordAudio).await,
            Err(PermissionError::Denied)
        );
    }
}
