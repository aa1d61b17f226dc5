//! Mirroring configuration
//!
//! A [`SyncConfig`] is resolved once at startup and never changes afterwards.
//! It is assembled from [`ConfigLayer`]s (a config file, then command-line
//! flags) where later layers override earlier ones, and validated before the
//! first cycle runs.
//!
//! # Defaults
//!
//! - output: `<source>_copy`
//! - interval: 40 seconds
//! - log file: `<source>.log`
//!
//! # Example
//!
//! ```ignore
//! use mirror_core::config::ConfigLayer;
//!
//! let flags = ConfigLayer { source: Some("photos".into()), ..Default::default() };
//! let config = ConfigLayer::load("mirror.toml".as_ref())?.merge(flags).resolve()?;
//! config.validate()?;
//! ```

mod layer;
mod paths;

pub use layer::ConfigLayer;
pub use paths::{resolve_path, sibling_with_suffix};

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use crate::{Error, Result};

/// Seconds between cycles when nothing else is configured.
pub const DEFAULT_INTERVAL_SECS: u64 = 40;

/// Suffix appended to the source path to derive the default output folder.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_copy";

/// Suffix appended to the source path to derive the default log file.
pub const DEFAULT_LOG_SUFFIX: &str = ".log";

/// Fully resolved, immutable mirroring configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Folder whose immediate entries are mirrored
    pub source: PathBuf,
    /// Folder that is cleared and rebuilt every cycle
    pub output: PathBuf,
    /// Pause between the end of one cycle and the start of the next
    pub interval: Duration,
    /// Where the CLI writes its log
    pub log_file: PathBuf,
    /// Upper bound on concurrent copy tasks; `None` means one task per entry
    pub max_parallel: Option<NonZeroUsize>,
}

impl SyncConfig {
    /// Build a configuration for `source` with every other value defaulted.
    pub fn for_source(source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        Self {
            output: sibling_with_suffix(&source, DEFAULT_OUTPUT_SUFFIX),
            log_file: sibling_with_suffix(&source, DEFAULT_LOG_SUFFIX),
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            max_parallel: None,
            source,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_log_file(mut self, log_file: impl Into<PathBuf>) -> Self {
        self.log_file = log_file.into();
        self
    }

    pub fn with_max_parallel(mut self, max_parallel: Option<NonZeroUsize>) -> Self {
        self.max_parallel = max_parallel;
        self
    }

    /// Reject configurations that would make a cycle destroy its own input.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] for a zero interval
    /// - [`Error::Overlap`] when source and output are equal or nested
    /// - [`Error::LogInsideOutput`] when the log file would be cleared
    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(Error::config("sync interval must be greater than zero"));
        }

        let source = resolve_path(&self.source)?;
        let output = resolve_path(&self.output)?;
        if source.starts_with(&output) || output.starts_with(&source) {
            return Err(Error::Overlap {
                source_dir: self.source.clone(),
                output_dir: self.output.clone(),
            });
        }

        let log_file = resolve_path(&self.log_file)?;
        if log_file.starts_with(&output) {
            return Err(Error::LogInsideOutput {
                log_file: self.log_file.clone(),
                output_dir: self.output.clone(),
            });
        }

        tracing::debug!(
            source = %source.display(),
            output = %output.display(),
            "Configuration validated"
        );
        Ok(())
    }
}
