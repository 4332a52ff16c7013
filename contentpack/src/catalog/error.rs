//! Catalog error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::error::PackError;

/// Errors raised while patching, staging or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not deserialize catalog json: {0}")]
    Parse(String),

    #[error("catalog m_InternalIds is missing or empty")]
    EmptyInternalIds,

    #[error("could not serialize patched catalog: {0}")]
    Serialize(String),

    #[error("invalid catalog extension '{0}', expected 'json'")]
    InvalidExtension(String),

    #[error("host returned no locator")]
    NullLocator,

    #[error("locator '{0}' exposes no keys")]
    NoKeys(String),

    #[error("host failed to load catalog: {0}")]
    Host(String),

    #[error("unknown witness asset extension '{0}'")]
    UnknownWitnessExtension(String),

    #[error("witness asset '{0}' did not resolve")]
    WitnessNotFound(String),

    #[error("staging I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CatalogError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach the manifest location and fold into the crate taxonomy.
    pub fn into_pack_error(self, path: impl Into<String>) -> PackError {
        match self {
            Self::Io { path, source } => PackError::io(path, source),
            Self::Parse(_)
            | Self::EmptyInternalIds
            | Self::Serialize(_)
            | Self::InvalidExtension(_) => PackError::format(path, self),
            Self::NullLocator | Self::NoKeys(_) | Self::Host(_) => {
                PackError::resolution(path, self)
            }
            Self::UnknownWitnessExtension(_) | Self::WitnessNotFound(_) => {
                PackError::validation(path, self)
            }
        }
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
