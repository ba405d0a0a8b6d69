//! File-backed tracing subscriber.
//!
//! The terminal belongs to the UI, so log output goes to a file and only when
//! one is configured.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use color_eyre::eyre::{WrapErr, eyre};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const FILTER_ENV: &str = "FOLIO_LOG";

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber. Returns `false` when logging is disabled.
pub fn init(path: Option<&Path>) -> color_eyre::Result<bool> {
    let Some(path) = path else {
        return Ok(false);
    };
    let file = open_log_file(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter_from(std::env::var(FILTER_ENV).ok().as_deref()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| eyre!("failed to install logger: {e}"))?;
    Ok(true)
}

fn open_log_file(path: &Path) -> color_eyre::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))
}

fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
