//! Platform collaborators of a recognition session.
//!
//! Each collaborator is a small domain type wrapping a provider trait, so the
//! session logic stays testable without a device:
//!
//! - [`AudioMuteController`] over [`VolumeControl`]
//! - [`ForegroundGuard`] over [`ProcessTable`]
//! - [`PermissionGate`] over [`PermissionPlatform`]
//! - [`LanguageCatalog`] over [`LanguageSource`]
//! - [`LocaleProvider`] for the default recognition language

mod audio;
mod foreground;
mod language;
mod locale;
mod permission;

pub use audio::{AudioMuteController, AudioStream, VolumeAdjustment, VolumeControl};
pub use foreground::{ForegroundGuard, ForegroundProcess, Importance, ProcessInfo, ProcessTable};
pub use language::{LanguageCatalog, LanguageError, LanguageSource, StaticLanguages};
pub use locale::{FixedLocale, LocaleProvider, SystemLocale, FALLBACK_LOCALE};
pub use permission::{
    Capability, GrantedPermissions, PermissionError, PermissionGate, PermissionPlatform,
    PermissionResponder, PermissionStatus, RUNTIME_PERMISSIONS_API_LEVEL,
};

/// Facts about the running platform version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformInfo {
    pub api_level: u32,
}

impl PlatformInfo {
    pub fn new(api_level: u32) -> Self {
        Self { api_level }
    }

    /// Whether permissions are granted at runtime rather than at install time.
    pub fn has_runtime_permissions(&self) -> bool {
        self.api_level >= RUNTIME_PERMISSIONS_API_LEVEL
    }
}

impl Default for PlatformInfo {
    fn default() -> Self {
        Self {
            api_level: RUNTIME_PERMISSIONS_API_LEVEL,
        }
    }
}
