//! Entry point for the scrubreel preview.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml`.
//! - Launch the window that scrubs the frame sequence with the scrollbar.

mod app;
mod cancellation;
mod config;
mod frames;
mod media;

use crate::app::run_app;
use crate::config::load_config;
use anyhow::{Context, Result, anyhow};
use scrubreel_core::ScrollSyncPlayer;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let config = load_config(Path::new("conf/config.toml"));
    set_log_level(reload_handle, config.log_level.as_filter_str());
    let frames_dir = parse_args(config.frames_dir.clone())?;
    info!(
        dir = %frames_dir.display(),
        level = %config.log_level,
        fps = config.fps,
        require_gesture = config.require_gesture,
        "Starting scrubreel"
    );
    info!(
        smoothing = ?config.sync.progress_smoothing,
        time_smoothing = config.sync.time_smoothing,
        window_start = config.sync.window.start,
        window_end = config.sync.window.end,
        "Active sync configuration"
    );
    let player =
        ScrollSyncPlayer::new(config.sync.clone()).context("Invalid [sync] configuration")?;
    run_app(config, frames_dir, player).context("Failed to start the GUI")?;
    Ok(())
}

fn parse_args(configured: Option<PathBuf>) -> Result<PathBuf> {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .or(configured)
        .ok_or_else(|| anyhow!("Usage: scrubreel <frames-dir>"))?;

    if !path.is_dir() {
        return Err(anyhow!("Frame directory not found: {}", path.display()));
    }
    Ok(path)
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with [logging] log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    if env::var_os("RUST_LOG").is_some() {
        info!("RUST_LOG is set; keeping its filter");
        return;
    }
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
