//! Error types for mirror-core

use std::path::PathBuf;

/// Result type for mirror-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirror-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration value missing or out of range
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// Source and output folders contain one another
    #[error("Source {source_dir} and output {output_dir} overlap")]
    Overlap {
        source_dir: PathBuf,
        output_dir: PathBuf,
    },

    /// Log file would be wiped by the clear phase
    #[error("Log file {log_file} is inside output folder {output_dir}")]
    LogInsideOutput {
        log_file: PathBuf,
        output_dir: PathBuf,
    },

    /// A blocking cycle phase panicked or was aborted
    #[error("Cycle task failed: {message}")]
    Task { message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from mirror-fs
    #[error(transparent)]
    Fs(#[from] mirror_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task {
            message: err.to_string(),
        }
    }
}
