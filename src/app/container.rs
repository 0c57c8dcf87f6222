use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::FfprobeAdapter;
use crate::app::compress_interactor::CompressInteractor;
use crate::engine::{shared_engine, EngineSettings};
use crate::ports::ProbePort;

/// Wires production adapters into the application interactors
pub struct AppContainer {
    compress_interactor: Arc<CompressInteractor>,
}

impl AppContainer {
    /// Build the container around the process-wide engine handle
    pub fn new(ffmpeg_path: Option<PathBuf>, ffprobe_path: Option<PathBuf>) -> Self {
        let engine = shared_engine(&EngineSettings { ffmpeg_path });
        let probe: Arc<dyn ProbePort> = Arc::new(FfprobeAdapter::new(ffprobe_path));

        Self {
            compress_interactor: Arc::new(CompressInteractor::new(engine, probe)),
        }
    }

    pub fn compress_interactor(&self) -> Arc<CompressInteractor> {
        Arc::clone(&self.compress_interactor)
    }
}
