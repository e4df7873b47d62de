use std::sync::Arc;

/// Process importance as reported by the platform's activity manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Importance {
    Foreground,
    Visible,
    Service,
    Cached,
    Gone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub name: String,
    pub importance: Importance,
}

impl ProcessInfo {
    pub fn new(name: impl Into<String>, importance: Importance) -> Self {
        Self {
            name: name.into(),
            importance,
        }
    }
}

/// Provider for the list of running application processes.
pub trait ProcessTable: Send + Sync {
    /// `None` when the platform cannot report processes.
    fn running_processes(&self) -> Option<Vec<ProcessInfo>>;
}

/// Process table for hosts that are always in front (desktop, headless).
pub struct ForegroundProcess(pub String);

impl ProcessTable for ForegroundProcess {
    fn running_processes(&self) -> Option<Vec<ProcessInfo>> {
        Some(vec![ProcessInfo::new(self.0.clone(), Importance::Foreground)])
    }
}

/// Answers whether the host application is currently in the foreground.
#[derive(Clone)]
pub struct ForegroundGuard {
    processes: Arc<dyn ProcessTable>,
    package_name: String,
}

impl ForegroundGuard {
    pub fn new(processes: Arc<dyn ProcessTable>, package_name: impl Into<String>) -> Self {
        Self {
            processes,
            package_name: package_name.into(),
        }
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn is_foreground(&self) -> bool {
        let Some(processes) = self.processes.running_processes() else {
            return false;
        };

        processes
            .iter()
            .any(|p| p.importance == Importance::Foreground && p.name == self.package_name)
    }
}

impl std::fmt::Debug for ForegroundGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForegroundGuard")
            .field("package_name", &self.package_name)
            .finish_non_exhaustive()
    }
}
