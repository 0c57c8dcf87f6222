//! Squeeze CLI Video Compressor Library
//!
//! Compresses videos to fit under a target file size by deriving a
//! size-targeted video bitrate and driving an external FFmpeg engine through
//! a narrow port.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod engine;
pub mod error;
pub mod output;
pub mod ports;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{
    CompressionPreset, CompressionSession, EncodedOutput, SessionStatus, SourceFile, PRESETS,
};
pub use domain::rules::{BitratePlanner, EncodeCommand};
pub use error::{SqueezeError, SqueezeResult};
