//! Tracing setup for the `feedgate` binary.
//!
//! Records go to `~/.local/state/feedgate/feedgate.log`. When the state
//! directory cannot be used the subscriber writes to stderr instead, so a
//! read-only home never stops a run.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Where log records ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    File(PathBuf),
    Stderr,
}

/// Filter directives: `RUST_LOG` wins; otherwise `--debug` opens up the
/// feedgate crates' debug records (per-rejection messages among them).
fn directives(debug: bool, env: Option<String>) -> String {
    match env.filter(|d| !d.trim().is_empty()) {
        Some(d) => d,
        None if debug => "info,feedgate_core=debug,feedgate=debug".to_string(),
        None => "info".to_string(),
    }
}

fn env_filter(debug: bool) -> EnvFilter {
    let wanted = directives(debug, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    EnvFilter::try_new(&wanted).unwrap_or_else(|_| EnvFilter::new(directives(debug, None)))
}

/// Path of the log file: `~/.local/state/feedgate/feedgate.log`.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("feedgate")?;
    Ok(xdg_dirs.get_state_home().join("feedgate.log"))
}

fn open_log_file() -> Result<(PathBuf, File)> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open {}", path.display()))?;
    Ok((path, file))
}

/// Installs the global subscriber and reports where it writes.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_logging(debug: bool) -> LogSink {
    match open_log_file() {
        Ok((path, file)) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter(debug))
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .try_init();
            tracing::info!("feedgate logging to {}", path.display());
            LogSink::File(path)
        }
        Err(err) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter(debug))
                .with_writer(io::stderr)
                .with_ansi(false)
                .try_init();
            tracing::warn!("file logging unavailable ({:#}); logging to stderr", err);
            LogSink::Stderr
        }
    }
}
