//! Scripted recognition engine.
//!
//! A script is a list of listening cycles. Every `start_listening` call plays
//! the next cycle's callbacks from a separate thread, the way a platform
//! recognizer calls back from its own looper.

use anyhow::Context;
use hearsay_engine::{EngineFactory, EngineListener, EngineOptions, RecognitionEngine};
use serde::Deserialize;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    Ready,
    BeginSpeech,
    EndSpeech,
    Rms {
        db: f32,
    },
    /// `matches` omitted simulates a results bundle without candidates.
    Partial {
        #[serde(default)]
        matches: Option<Vec<String>>,
    },
    Final {
        #[serde(default)]
        matches: Option<Vec<String>>,
    },
    /// Platform integer error code (1..=9).
    Error {
        code: i32,
    },
    Pause {
        ms: u64,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    pub cycles: Vec<Vec<ScriptEvent>>,
}

impl Script {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        let script: Script = serde_json::from_str(&raw)
            .with_context(|| format!("invalid script {}", path.display()))?;
        if script.cycles.is_empty() {
            anyhow::bail!("script {} has no cycles", path.display());
        }
        Ok(script)
    }
}

/// Hands out engines that share one queue of remaining cycles.
#[derive(Clone)]
pub struct ScriptedEngineFactory {
    cycles: Arc<Mutex<VecDeque<Vec<ScriptEvent>>>>,
}

impl ScriptedEngineFactory {
    pub fn new(script: Script) -> Self {
        Self {
            cycles: Arc::new(Mutex::new(script.cycles.into())),
        }
    }

    pub fn remaining(&self) -> usize {
        self.cycles.lock().map(|c| c.len()).unwrap_or(0)
    }
}

impl EngineFactory for ScriptedEngineFactory {
    fn is_available(&self) -> bool {
        true
    }

    fn create(
        &self,
        listener: EngineListener,
    ) -> hearsay_engine::Result<Box<dyn RecognitionEngine>> {
        tracing::info!(generation = listener.generation(), "scripted engine created");
        Ok(Box::new(ScriptedEngine {
            listener,
            cycles: Arc::clone(&self.cycles),
        }))
    }
}

pub struct ScriptedEngine {
    listener: EngineListener,
    cycles: Arc<Mutex<VecDeque<Vec<ScriptEvent>>>>,
}

impl RecognitionEngine for ScriptedEngine {
    fn start_listening(&mut self, options: &EngineOptions) -> hearsay_engine::Result<()> {
        let cycle = self
            .cycles
            .lock()
            .map_err(|e| hearsay_engine::EngineError::CallFailed(e.to_string()))?
            .pop_front();

        let Some(cycle) = cycle else {
            tracing::info!("script exhausted, engine stays silent");
            return Ok(());
        };

        tracing::info!(
            language = %options.language,
            max_results = options.max_results,
            partials = options.partial_results,
            events = cycle.len(),
            "replaying listening cycle"
        );
        let listener = self.listener.clone();
        std::thread::spawn(move || replay(&listener, cycle));
        Ok(())
    }

    fn stop_listening(&mut self) -> hearsay_engine::Result<()> {
        tracing::info!(generation = self.listener.generation(), "scripted engine stopped");
        Ok(())
    }

    fn cancel(&mut self) -> hearsay_engine::Result<()> {
        tracing::info!(generation = self.listener.generation(), "scripted engine cancelled");
        Ok(())
    }

    fn destroy(&mut self) {
        tracing::info!(generation = self.listener.generation(), "scripted engine destroyed");
    }
}

fn replay(listener: &EngineListener, cycle: Vec<ScriptEvent>) {
    for event in cycle {
        match event {
            ScriptEvent::Ready => listener.on_ready_for_speech(),
            ScriptEvent::BeginSpeech => listener.on_beginning_of_speech(),
            ScriptEvent::EndSpeech => listener.on_end_of_speech(),
            ScriptEvent::Rms { db } => listener.on_rms_changed(db),
            ScriptEvent::Partial { matches } => listener.on_partial_results(matches),
            ScriptEvent::Final { matches } => listener.on_results(matches),
            ScriptEvent::Error { code } => listener.on_error(code),
            ScriptEvent::Pause { ms } => std::thread::sleep(Duration::from_millis(ms)),
        }
    }
}
