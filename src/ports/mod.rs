// Ports - Interface definitions (contracts)

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::DomainError;

/// Observer for events emitted by the transcoding engine
///
/// Implementations must tolerate being called from the engine's I/O task and
/// must not block.
pub trait EngineObserver: Send + Sync {
    /// Called with the engine's fractional progress signal (0..1)
    fn on_progress(&self, fraction: f64);

    /// Called for each log line the engine emits
    fn on_log(&self, message: &str);
}

/// Port for the external transcoding engine
///
/// The engine exposes an addressable filesystem for staging input and output
/// under fixed names, and runs one command-line-style encode at a time. At
/// most one encode may be in flight against a handle.
#[async_trait]
pub trait EnginePort: Send + Sync {
    /// Initialize the engine runtime
    ///
    /// Expensive; intended to be called once per process through the shared
    /// handle's acquisition guard.
    async fn load(&self) -> Result<(), DomainError>;

    /// Stage input bytes under a fixed name in the engine's filesystem
    async fn write_input(&self, name: &str, bytes: &[u8]) -> Result<(), DomainError>;

    /// Read output bytes back out of the engine's filesystem
    async fn read_output(&self, name: &str) -> Result<Vec<u8>, DomainError>;

    /// Run one encode command
    ///
    /// The argument vector follows the command-line encoder contract built by
    /// [`crate::domain::rules::EncodeCommand`].
    async fn execute(&self, args: &[String]) -> Result<(), DomainError>;

    /// Register an observer for progress and log events
    ///
    /// Observers persist for the lifetime of the handle.
    fn subscribe(&self, observer: Arc<dyn EngineObserver>);
}

/// Port for probing source media
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe the duration of a media file in seconds
    ///
    /// Fails (rather than hanging) for files the decoder cannot probe.
    async fn probe_duration(&self, path: &Path) -> Result<f64, DomainError>;
}
