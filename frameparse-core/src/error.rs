//! Error types for frameparse operations

use crate::convention::Convention;

/// Errors that can occur while parsing or generating framecodes and ranges
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameparseError {
    /// No recognized framecode in the input
    #[error("No framecode found in '{0}'")]
    NoFramecodeFound(String),

    /// Target convention has no placeholder generator
    #[error("Cannot generate framecode of type '{0}'")]
    UnsupportedGeneration(Convention),

    /// Unknown convention name
    #[error("'{0}' is not a supported framecode type")]
    UnsupportedConvention(String),

    /// Fill width must be at least 1
    #[error("'width' must be positive, got {0}")]
    InvalidWidth(usize),

    /// Unknown width-policy name
    #[error("'{0}' is not a supported width policy; available options: 'any', 'min', 'max', 'exact'")]
    InvalidWidthPolicy(String),

    /// Number formatting received nothing to format
    #[error("Input is empty")]
    EmptyInput,
}
