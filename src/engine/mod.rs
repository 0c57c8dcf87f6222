//! Shared engine handle management
//!
//! The transcoding engine is expensive to initialize, so one handle is
//! constructed per process and reused across compression sessions.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use tokio::sync::OnceCell;

use crate::adapters::exec_ffmpeg::FfmpegExecAdapter;
use crate::domain::errors::DomainError;
use crate::ports::EnginePort;

/// Engine runtime settings
#[derive(Debug, Clone, Default)]
pub struct EngineSettings {
    /// Explicit path to the engine runtime; resolved from PATH when unset
    pub ffmpeg_path: Option<PathBuf>,
}

/// Process-wide shared engine handle
///
/// Construct once, load once, reuse forever: [`SharedEngine::acquire`] runs
/// the engine's load exactly once behind a one-shot initialization cell, and
/// every later call returns the cached handle without reloading. A session
/// reset never tears the handle down.
///
/// The handle is a single serialized resource: at most one encode may be in
/// flight against it at a time. Callers drive one session to completion
/// before starting the next.
pub struct SharedEngine {
    inner: Arc<dyn EnginePort>,
    loaded: OnceCell<()>,
}

impl SharedEngine {
    /// Wrap an engine port behind the one-shot load guard
    pub fn new(inner: Arc<dyn EnginePort>) -> Self {
        Self {
            inner,
            loaded: OnceCell::new(),
        }
    }

    /// Acquire the loaded engine handle, initializing it on first use
    pub async fn acquire(&self) -> Result<Arc<dyn EnginePort>, DomainError> {
        self.loaded
            .get_or_try_init(|| async { self.inner.load().await })
            .await?;
        Ok(Arc::clone(&self.inner))
    }

    /// Whether the engine has completed its one-time load
    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }
}

static SHARED_ENGINE: OnceLock<Arc<SharedEngine>> = OnceLock::new();

/// Process-wide accessor for the shared engine handle
///
/// Idempotent across calls; the first caller's settings win.
pub fn shared_engine(settings: &EngineSettings) -> Arc<SharedEngine> {
    Arc::clone(SHARED_ENGINE.get_or_init(|| {
        Arc::new(SharedEngine::new(Arc::new(FfmpegExecAdapter::new(
            settings.clone(),
        ))))
    }))
}
