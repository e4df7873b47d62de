//! Drives a hearsay session against a scripted recognizer and prints every
//! delivery as one JSON line.

mod host;
mod script;

use anyhow::Context;
use clap::Parser;
use hearsay_engine::StartRequest;
use hearsay_platform::{PlatformInfo, StaticLanguages};
use hearsay_session::{ChannelSink, SpeechPlatform, SpeechService};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use host::{ForegroundFor, LoggingVolume};
use script::{Script, ScriptedEngineFactory};

const PACKAGE_NAME: &str = "hearsay.simulator";

#[derive(Parser)]
#[command(name = "hearsay-simulator")]
#[command(about = "Replay scripted recognizer callbacks through a speech session")]
#[command(version)]
struct Cli {
    /// JSON script with one list of recognizer events per listening cycle
    script: PathBuf,

    /// Recognition language (defaults to $LANG, then en_US)
    #[arg(short, long)]
    language: Option<String>,

    /// Number of transcript candidates to request
    #[arg(short, long)]
    max_results: Option<u32>,

    /// Deliver partial results while speaking
    #[arg(short, long)]
    partials: bool,

    /// Report the app as backgrounded after this many foreground checks
    #[arg(long)]
    foreground_checks: Option<usize>,

    /// Platform API level; below 23 permissions are install-time
    #[arg(long, default_value_t = 23)]
    api_level: u32,

    /// Stop once no delivery arrives for this many milliseconds
    #[arg(long, default_value_t = 500)]
    idle_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "info,hearsay=trace"
    } else {
        "info,hearsay=debug"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let script = Script::load(&cli.script)?;
    tracing::info!(cycles = script.cycles.len(), "loaded script");

    let mut platform =
        SpeechPlatform::headless(PACKAGE_NAME, Arc::new(ScriptedEngineFactory::new(script)));
    platform.info = PlatformInfo::new(cli.api_level);
    platform.volume = Some(Arc::new(LoggingVolume));
    platform.languages = Arc::new(StaticLanguages(vec!["en-US".to_string()]));
    if let Some(checks) = cli.foreground_checks {
        platform.processes = Arc::new(ForegroundFor::new(PACKAGE_NAME, checks));
    }

    let service = SpeechService::spawn(platform);
    let (sink, mut deliveries) = ChannelSink::new();

    let request = StartRequest {
        language: cli.language,
        max_results: cli.max_results,
        show_partial_results: Some(cli.partials),
        present_ui: Some(false),
        ..Default::default()
    };
    service
        .start_listening(request, Arc::new(sink))
        .await
        .context("failed to start listening")?;

    let idle = Duration::from_millis(cli.idle_ms);
    let mut delivered = 0usize;
    while let Ok(Some(envelope)) = tokio::time::timeout(idle, deliveries.recv()).await {
        delivered += 1;
        println!("{}", serde_json::to_string(&envelope)?);
        if !envelope.keep_open {
            break;
        }
    }

    service.stop_listening().await;
    let state = service.session_state().await?;
    tracing::info!(delivered, %state, "simulation finished");
    service.shutdown();

    Ok(())
}
