//! Tracing subscriber setup
//!
//! Console output goes to stderr so `--json` reports on stdout stay clean.
//! The log file receives the same events without ANSI colors and is rotated
//! by size: once it passes [`MAX_LOG_BYTES`] it is renamed to `<file>.1`,
//! older backups shift up, and at most [`LOG_BACKUPS`] are kept.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use file_rotate::compression::Compression;
use file_rotate::suffix::AppendCount;
use file_rotate::{ContentLimit, FileRotate};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{CliError, Result};

/// Size at which the log file is rotated.
pub const MAX_LOG_BYTES: usize = 1_024_000;

/// Number of rotated log files kept next to the active one.
pub const LOG_BACKUPS: usize = 3;

/// Install the global subscriber.
///
/// The level comes from `RUST_LOG` when set, otherwise `info` (or `debug`
/// when `verbose` is true).
pub fn init(log_file: &Path, verbose: bool) -> Result<()> {
    let file_writer = rotating_writer(log_file, MAX_LOG_BYTES)?;

    let default_level = if verbose { "debug" } else { "info" };
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| CliError::user(format!("Invalid log filter: {e}")))?;

    let console_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file_writer));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| CliError::user(format!("Failed to install logger: {e}")))?;

    Ok(())
}

/// Open `log_file` for appending, creating its parent directories, and wrap
/// it in a size-rotating writer.
fn rotating_writer(log_file: &Path, max_bytes: usize) -> Result<FileRotate<AppendCount>> {
    let log_error = |source| CliError::LogFile {
        path: log_file.to_path_buf(),
        source,
    };

    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(log_error)?;
    }
    // The rotating writer swallows open errors, so probe the file here
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(log_error)?;

    Ok(FileRotate::new(
        log_file,
        AppendCount::new(LOG_BACKUPS),
        ContentLimit::Bytes(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None,
    ))
}
