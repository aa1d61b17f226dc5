//! Errors surfaced by the `dirmirror` binary

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Anything that stops `dirmirror` before or instead of looping.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration or cycle error from the engine
    #[error(transparent)]
    Core(#[from] mirror_core::Error),

    /// Log file could not be prepared
    #[error("Cannot open log file {}: {source}", .path.display())]
    LogFile {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `--json` report could not be rendered
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Logger setup failed
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
