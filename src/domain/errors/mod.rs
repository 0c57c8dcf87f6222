// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
#[derive(Debug, Clone)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// Input file not found
    FileNotFound(String),
    /// Input file exceeds the configured size ceiling
    FileTooLarge(String),
    /// Operation not valid in the current session state
    InvalidState(String),
    /// Duration probe failed or timed out
    ProbeFailed(String),
    /// Engine runtime could not be located or initialized
    EngineUnavailable(String),
    /// Encode command failed
    EncodeFailed(String),
    /// File system operation failed
    FsFail(String),
    /// Internal error
    InternalError(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::FileNotFound(msg) => write!(f, "File not found: {}", msg),
            DomainError::FileTooLarge(msg) => write!(f, "File too large: {}", msg),
            DomainError::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            DomainError::ProbeFailed(msg) => write!(f, "Probe failed: {}", msg),
            DomainError::EngineUnavailable(msg) => write!(f, "Engine unavailable: {}", msg),
            DomainError::EncodeFailed(msg) => write!(f, "Encode failed: {}", msg),
            DomainError::FsFail(msg) => write!(f, "File system error: {}", msg),
            DomainError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
