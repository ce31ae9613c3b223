//! Logging init: file under XDG state dir, or graceful fallback to stderr.

use anyhow::{anyhow, Result};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,tlcalc=debug,tlcalc_core=debug";

/// Where [`init`] ended up sending events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Path of the log file: `~/.local/state/tlcalc/tlcalc.log` (parent dir is created).
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("tlcalc")?;
    Ok(xdg_dirs.place_state_file("tlcalc.log")?)
}

/// Opens `path` for appending, creating it if needed.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn install<W>(writer: W) -> Result<()>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("install log subscriber: {e}"))
}

/// Installs the global subscriber: the state-dir log file when it can be
/// opened, stderr otherwise. Errors only if a subscriber is already set.
pub fn init() -> Result<LogTarget> {
    let opened = log_path().and_then(|path| Ok((open_log_file(&path)?, path)));
    match opened {
        Ok((file, path)) => {
            install(Mutex::new(file))?;
            tracing::info!("tlcalc logging initialized at {}", path.display());
            Ok(LogTarget::File(path))
        }
        Err(err) => {
            install(io::stderr)?;
            tracing::warn!("log file unavailable ({err:#}); logging to stderr");
            Ok(LogTarget::Stderr)
        }
    }
}
