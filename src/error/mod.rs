//! Error handling module for Squeeze

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for Squeeze operations
#[derive(Error, Debug)]
pub enum SqueezeError {
    /// Input file exceeds the configured size ceiling
    #[error("Input file too large: {size_mb}MB (maximum {max_mb}MB)")]
    InputTooLarge { size_mb: u64, max_mb: u64 },

    /// Shared engine failed to initialize
    #[error("Engine load failed: {message}")]
    EngineLoadFailure { message: String },

    /// Probe, staging, encode, or output read failed
    #[error("Encode failed: {message}")]
    EncodeFailure { message: String },

    /// Output file write error
    #[error("Failed to write output file: {message}")]
    OutputError { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Domain layer error
    #[error("{0}")]
    Domain(#[from] DomainError),
}

/// Result type alias for Squeeze operations
pub type SqueezeResult<T> = std::result::Result<T, SqueezeError>;
