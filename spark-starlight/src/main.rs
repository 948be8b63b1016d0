#![cfg_attr(debug_assertions, allow(warnings))]

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod pacing;
mod replay;

use crate::pacing::FrameGate;
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde_json::json;
use spark_navigation::{Navigator, NavigatorConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Replays a recorded detection session through the navigation engine.
#[derive(Parser, Debug)]
#[command(name = "spark-starlight")]
#[command(version)]
struct Args {
    /// JSON-lines recording, one frame per line
    recording: PathBuf,

    /// Interval between frames in milliseconds
    #[arg(long, default_value = "500")]
    cadence_ms: u64,

    /// Navigator configuration file (JSON)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Longer cooldown window; frames recorded with `speech_active: true` also
    /// suppress instructions below the override priority
    #[arg(long)]
    strict: bool,

    #[arg(long, short)]
    verbose: bool,
}

pub fn log_init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .try_init();
}

fn load_config(args: &Args) -> Result<NavigatorConfig> {
    let mut config = match &args.config {
        Some(path) => NavigatorConfig::from_file(path)
            .with_context(|| format!("Invalid configuration {}", path.display()))?,
        None => NavigatorConfig::default(),
    };
    if args.strict {
        let strict = NavigatorConfig::strict();
        config.cooldown_ms = strict.cooldown_ms;
        config.mode = strict.mode;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if args.verbose && std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "debug");
    }
    log_init();

    let config = load_config(&args)?;
    let frames = replay::load_frames(&args.recording)?;
    let total = frames.len();

    let gate = Arc::new(FrameGate::new());
    let producer = {
        let gate = gate.clone();
        let cadence = Duration::from_millis(args.cadence_ms.max(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(cadence);
            for frame in frames {
                ticker.tick().await;
                gate.submit(frame);
            }
            gate.close();
        })
    };

    let mut navigator = Navigator::new(config);
    let mut emitted = 0usize;
    while let Some(recorded) = gate.next().await {
        let outcome = replay::apply(&mut navigator, &recorded);
        if let Some(instruction) = outcome.instruction {
            emitted += 1;
            println!(
                "{}",
                json!({ "timestamp_ms": recorded.frame.timestamp_ms, "instruction": instruction })
            );
        }
    }
    producer.await?;

    info!(
        "Replayed {total} frames: {emitted} instructions, {} frames dropped",
        gate.dropped()
    );
    Ok(())
}
