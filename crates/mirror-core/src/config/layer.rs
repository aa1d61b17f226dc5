//! Partial configuration layers and their merge

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use mirror_fs::ConfigStore;
use serde::Deserialize;

use super::SyncConfig;
use crate::{Error, Result};

/// One source of configuration values; every field is optional.
///
/// The same shape is read from config files (`.toml`, `.json`, `.yaml`) and
/// built from command-line flags. Relative paths are taken relative to the
/// working directory, not to the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    pub source: Option<PathBuf>,
    pub output: Option<PathBuf>,
    /// Seconds between cycles
    pub interval: Option<u64>,
    #[serde(alias = "loggingfile")]
    pub log_file: Option<PathBuf>,
    pub max_parallel: Option<NonZeroUsize>,
}

impl ConfigLayer {
    /// Read a layer from a config file; the format follows the extension.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(ConfigStore::new().load(path)?)
    }

    /// Combine two layers. Values set in `over` win.
    pub fn merge(self, over: Self) -> Self {
        Self {
            source: over.source.or(self.source),
            output: over.output.or(self.output),
            interval: over.interval.or(self.interval),
            log_file: over.log_file.or(self.log_file),
            max_parallel: over.max_parallel.or(self.max_parallel),
        }
    }

    /// Fill in defaults and produce the final configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when no source folder was given.
    pub fn resolve(self) -> Result<SyncConfig> {
        let source = self
            .source
            .ok_or_else(|| Error::config("a source folder is required"))?;

        let mut config = SyncConfig::for_source(source).with_max_parallel(self.max_parallel);
        if let Some(output) = self.output {
            config = config.with_output(output);
        }
        if let Some(secs) = self.interval {
            config = config.with_interval(Duration::from_secs(secs));
        }
        if let Some(log_file) = self.log_file {
            config = config.with_log_file(log_file);
        }
        Ok(config)
    }
}
