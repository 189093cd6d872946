//! Tracing setup.
//!
//! The slideshow owns the terminal while it runs, so log lines never go to
//! stdout or stderr. With `--log-file` they are appended to that file
//! (no ANSI colors, level from `RUST_LOG`, `info` when unset). Without it no
//! subscriber is installed and events are dropped.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "info";

/// Open `path` for appending, creating it if needed.
pub fn open_log_file(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Build a plain-text subscriber that writes into `file`.
pub fn file_subscriber(file: File, filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish()
}

/// Install the global subscriber for this process.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = open_log_file(path)
        .with_context(|| format!("Failed to open log file '{}'", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing::subscriber::set_global_default(file_subscriber(file, filter))
        .context("Failed to install tracing subscriber")?;

    tracing::info!(path = %path.display(), "Logging to file");
    Ok(())
}
