//! File logging for the terminal app.
//!
//! The terminal is in raw mode while the app runs, so log lines go to a file
//! instead of stderr.

use crate::app_dirs::AppDirs;
use crate::error::{MathFunError, Result};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_DIRECTIVE: &str = "mathfun=info";

/// Build the filter from `RUST_LOG`, always keeping our own crate at info
pub fn env_filter() -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match DEFAULT_DIRECTIVE.parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Create (or append to) the log file, creating parent directories
pub fn open_log_file(path: &Path) -> Result<File> {
    let io_err = |source| MathFunError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)
}

/// Install the global subscriber writing to `path`, or to the state dir.
///
/// Returns the log path in use, or None when no location is writable and
/// logging stays off.
pub fn init(path: Option<PathBuf>) -> Option<PathBuf> {
    let path = path.or_else(AppDirs::log_path)?;
    let file = open_log_file(&path).ok()?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .is_ok();
    installed.then_some(path)
}
