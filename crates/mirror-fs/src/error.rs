//! Error types for mirror-fs

use std::fmt;
use std::path::{Path, PathBuf};

/// Result type for mirror-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirror-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} item(s) failed to copy under {path}: {}", .failures.len(), summarize(.failures))]
    TreeCopy {
        path: PathBuf,
        failures: Vec<TreeCopyFailure>,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Convert a directory walk error, falling back to `root` when the walk
    /// did not name a path.
    pub(crate) fn walk(root: &Path, err: walkdir::Error) -> Self {
        let failure = TreeCopyFailure::from_walk(root, err);
        Self::io(failure.path, failure.source)
    }
}

/// One nested item that could not be copied during a tree copy.
#[derive(Debug)]
pub struct TreeCopyFailure {
    pub path: PathBuf,
    pub source: std::io::Error,
}

impl TreeCopyFailure {
    pub(crate) fn from_walk(root: &Path, err: walkdir::Error) -> Self {
        let path = err.path().unwrap_or(root).to_path_buf();
        Self {
            path,
            source: err.into(),
        }
    }
}

impl fmt::Display for TreeCopyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.source)
    }
}

fn summarize(failures: &[TreeCopyFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
