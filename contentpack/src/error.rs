//! Error taxonomy shared by every pipeline stage.
//!
//! Stage-specific errors (catalog patching, routing, host calls) are
//! converted into a [`PackError`] at the boundary where the pack or
//! manifest path is known.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Broad classification of a [`PackError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed JSON, manifest, or unsupported internal path.
    Format,
    /// Filesystem failure.
    Io,
    /// Assembly, manifest or asset load failure reported by the host.
    Resolution,
    /// Witness asset could not be resolved.
    Validation,
}

impl ErrorKind {
    /// Short name used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Format => "FormatError",
            Self::Io => "IOError",
            Self::Resolution => "ResolutionError",
            Self::Validation => "ValidationError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An error attributed to a pack entry or a staged manifest.
///
/// `path` is the offending location: `<archive>/<internal path>` for entry
/// errors, the staged file for manifest errors.
#[derive(Debug, Error)]
pub enum PackError {
    #[error("could not read '{path}': {reason}")]
    Format { path: String, reason: String },

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not load '{path}': {reason}")]
    Resolution { path: String, reason: String },

    #[error("validation of '{path}' failed: {reason}")]
    Validation { path: String, reason: String },
}

impl PackError {
    pub fn format(path: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Format {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn resolution(path: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Resolution {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn validation(path: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Validation {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// The taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Format { .. } => ErrorKind::Format,
            Self::Io { .. } => ErrorKind::Io,
            Self::Resolution { .. } => ErrorKind::Resolution,
            Self::Validation { .. } => ErrorKind::Validation,
        }
    }
}

/// Joins an archive path and a member's internal path for error messages.
pub fn entry_location(archive: &Path, internal_path: &str) -> String {
    archive.join(internal_path).display().to_string()
}
