//! CLI error type.

use std::fmt;
use std::path::PathBuf;

/// Errors reported by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be loaded or is incomplete.
    Config(String),
    /// Logging could not be set up.
    Logging(String),
    /// The pipeline aborted before processing any pack.
    Pipeline(String),
    /// An archive could not be listed.
    Inspect { path: PathBuf, reason: String },
    /// Staging could not be removed.
    Clean { path: PathBuf, reason: String },
    /// At least one pack failed; the run itself finished.
    PacksFailed(usize),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Logging(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Pipeline(msg) => write!(f, "Pipeline aborted: {}", msg),
            CliError::Inspect { path, reason } => {
                write!(f, "Failed to read {}: {}", path.display(), reason)
            }
            CliError::Clean { path, reason } => {
                write!(f, "Failed to remove {}: {}", path.display(), reason)
            }
            CliError::PacksFailed(count) => write!(f, "{} pack(s) failed to load", count),
        }
    }
}

impl std::error::Error for CliError {}
