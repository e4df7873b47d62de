//! Host-side platform adapters for the simulator.

use hearsay_platform::{
    AudioStream, Importance, ProcessInfo, ProcessTable, VolumeAdjustment, VolumeControl,
};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Volume control that only logs what a device would do.
pub struct LoggingVolume;

impl VolumeControl for LoggingVolume {
    fn adjust_stream_volume(&self, stream: AudioStream, adjustment: VolumeAdjustment) {
        tracing::debug!(?stream, ?adjustment, "adjust stream volume");
    }

    fn set_stream_mute(&self, stream: AudioStream, muted: bool) {
        tracing::debug!(?stream, muted, "set stream mute");
    }
}

/// Reports the simulator in front for a fixed number of checks, then as
/// backgrounded, to exercise the restart guard.
pub struct ForegroundFor {
    package_name: String,
    remaining: AtomicUsize,
}

impl ForegroundFor {
    pub fn new(package_name: impl Into<String>, checks: usize) -> Self {
        Self {
            package_name: package_name.into(),
            remaining: AtomicUsize::new(checks),
        }
    }
}

impl ProcessTable for ForegroundFor {
    fn running_processes(&self) -> Option<Vec<ProcessInfo>> {
        let in_front = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();

        let importance = if in_front {
            Importance::Foreground
        } else {
            tracing::info!("simulated app moved to background");
            Importance::Cached
        };
        Some(vec![ProcessInfo::new(self.package_name.clone(), importance)])
    }
}
