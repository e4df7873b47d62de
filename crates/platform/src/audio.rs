//! System audio muting while the recognizer captures.

use crate::PlatformInfo;
use std::sync::Arc;

/// Output streams silenced during capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioStream {
    Notification,
    Alarm,
    Music,
    Ring,
    System,
}

impl AudioStream {
    pub const ALL: [AudioStream; 5] = [
        AudioStream::Notification,
        AudioStream::Alarm,
        AudioStream::Music,
        AudioStream::Ring,
        AudioStream::System,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeAdjustment {
    Mute,
    Unmute,
}

/// Platform volume API.
pub trait VolumeControl: Send + Sync {
    /// Adjustment-based muting (runtime-permission platforms and later).
    fn adjust_stream_volume(&self, stream: AudioStream, adjustment: VolumeAdjustment);

    /// Legacy boolean mute for older platforms.
    fn set_stream_mute(&self, stream: AudioStream, muted: bool);
}

/// Mutes and unmutes all five output streams at once.
///
/// Without a volume control both operations are no-ops.
#[derive(Clone)]
pub struct AudioMuteController {
    volume: Option<Arc<dyn VolumeControl>>,
    platform: PlatformInfo,
}

impl AudioMuteController {
    pub fn new(volume: Option<Arc<dyn VolumeControl>>, platform: PlatformInfo) -> Self {
        Self { volume, platform }
    }

    pub fn mute(&self) {
        self.apply(true);
    }

    pub fn unmute(&self) {
        self.apply(false);
    }

    fn apply(&self, mute: bool) {
        let Some(volume) = &self.volume else {
            tracing::debug!(mute, "no volume control, skipping");
            return;
        };

        if self.platform.has_runtime_permissions() {
            let adjustment = if mute {
                VolumeAdjustment::Mute
            } else {
                VolumeAdjustment::Unmute
            };
            for stream in AudioStream::ALL {
                volume.adjust_stream_volume(stream, adjustment);
            }
        } else {
            for stream in AudioStream::ALL {
                volume.set_stream_mute(stream, mute);
            }
        }
        tracing::debug!(mute, "system audio streams updated");
    }
}

impl std::fmt::Debug for AudioMuteController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioMuteController")
            .field("has_volume_control", &self.volume.is_some())
            .field("platform", &self.platform)
            .finish()
    }
}
