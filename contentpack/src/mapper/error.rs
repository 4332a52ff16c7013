//! Mapping error types.

use thiserror::Error;

/// Errors raised while mapping a descriptor onto a target.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("no automapped descriptor named '{0}'")]
    MissingDescriptor(String),

    #[error("descriptor '{name}' is invalid: {reason}")]
    Descriptor { name: String, reason: String },

    #[error("{source_type} value '{value}' has no counterpart in {target_type}")]
    UnmappedEnum {
        source_type: &'static str,
        target_type: &'static str,
        value: &'static str,
    },
}

/// Result type for mapping operations.
pub type MappingResult<T> = Result<T, MappingError>;
