//! `vantage-node` – reference host for the sensor fusion pipeline.
//!
//! This binary exercises the full host contract:
//!
//! 1. Loads `vantage.toml` (or the path given as the first argument) and
//!    applies `VANTAGE_*` environment overrides.
//! 2. Resolves the configured profile through the built-in registry.
//! 3. Assembles the stage pipeline for that profile and drives it for the
//!    configured number of simulation ticks, synthesising deterministic
//!    feature data from the profile's mounts each tick.
//!
//! A stage failure is alerted and aborts the run with a non-zero exit code.

mod config;
mod scenario;

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};

use vantage_model::registry::ProfileRegistry;
use vantage_model::sequence::Sequence;
use vantage_model::stage::{AlertSink, LogSink, Stage, StageContext};
use vantage_types::VantageError;

fn main() -> ExitCode {
    // ── Structured logging ────────────────────────────────────────────────
    // Initialise tracing-subscriber using RUST_LOG (defaults to "info").
    // Set VANTAGE_LOG_FORMAT=json to emit newline-delimited JSON logs
    // suitable for log aggregators.
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    if std::env::var("VANTAGE_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .compact()
            .init();
    }

    // ── Configuration ─────────────────────────────────────────────────────
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("vantage.toml"));
    let mut cfg = match config::load_from(&path) {
        Ok(Some(cfg)) => {
            info!(path = %path.display(), "config loaded");
            cfg
        }
        Ok(None) => {
            info!(path = %path.display(), "no config file found; using defaults");
            config::Config::default()
        }
        Err(e) => {
            error!(path = %path.display(), "{e}; using default configuration");
            config::Config::default()
        }
    };
    config::apply_env_overrides(&mut cfg);

    match run(&cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

/// Drive the configured pipeline for `cfg.tick_count` simulation ticks.
fn run(cfg: &config::Config) -> Result<(), VantageError> {
    let registry = ProfileRegistry::with_builtins();
    let profile = match registry.load(&cfg.profile) {
        Ok(profile) => profile,
        Err(e) => {
            error!(available = ?registry.names(), "{e}");
            return Err(e);
        }
    };

    // Stage diagnostics flow into the same subscriber as host logs; alerts
    // are raised at error level.
    let context = StageContext::new(
        LogSink::new(|message| info!("{message}")),
        AlertSink::new(|message| error!("{message}")),
    );
    let mut pipeline = Sequence::from_profile(&profile, &context);
    info!(
        profile = %profile.name,
        stages = pipeline.len(),
        ticks = cfg.tick_count,
        "starting run"
    );

    for tick in 0..cfg.tick_count {
        let mut buffer = scenario::build_buffer(&profile, tick, cfg);
        if let Err(e) = pipeline.apply(&mut buffer) {
            context.alert(&format!("tick {tick} aborted: {e}"));
            return Err(e);
        }
        info!(
            tick,
            logical_detections = buffer.logical_detections.len(),
            "tick complete"
        );
    }

    info!("run complete");
    Ok(())
}
