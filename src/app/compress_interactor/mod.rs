// Compress interactor - Orchestrates one compression session

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{error, info};

use crate::domain::errors::DomainError;
use crate::domain::model::{CompressionSession, EncodedOutput, SourceFile};
use crate::domain::rules::{BitratePlanner, EncodeCommand, INPUT_NAME, OUTPUT_NAME};
use crate::engine::SharedEngine;
use crate::ports::{EngineObserver, EnginePort, ProbePort};

/// Guidance surfaced when the shared engine fails to initialize
pub const ENGINE_LOAD_FAILED_MESSAGE: &str = "Could not initialize the encoding engine. \
     Install FFmpeg with libx264 support, or point --ffmpeg (or SQUEEZE_FFMPEG) at an ffmpeg binary.";

/// Aggregated user-facing message for any failure during probe, staging,
/// encode, or output read
pub const COMPRESSION_FAILED_MESSAGE: &str = "An error occurred during compression. \
     Check that the input is a playable video file and try again.";

/// Bridges engine events into the session's bounded state
///
/// Observers outlive sessions on the shared handle, so events are dropped
/// once the session they belong to has reached a terminal state.
struct SessionObserver {
    session: Arc<Mutex<CompressionSession>>,
}

impl EngineObserver for SessionObserver {
    fn on_progress(&self, fraction: f64) {
        if let Ok(mut session) = self.session.lock() {
            if !session.is_terminal() {
                session.set_progress(fraction);
            }
        }
    }

    fn on_log(&self, message: &str) {
        if let Ok(mut session) = self.session.lock() {
            if !session.is_terminal() {
                session.push_log(message);
            }
        }
    }
}

/// Interactor for the compression use case
///
/// Sequences one session strictly: acquire engine, probe duration, compute
/// bitrate, stage input, execute, read output. Every failure is caught here
/// and collapsed into the session's terminal `Error` state; there are no
/// internal retries.
pub struct CompressInteractor {
    engine: Arc<SharedEngine>,
    probe: Arc<dyn ProbePort>,
    session: Arc<Mutex<CompressionSession>>,
    extra_observers: Mutex<Vec<Arc<dyn EngineObserver>>>,
    subscribed: AtomicBool,
}

impl CompressInteractor {
    /// Create a new interactor with injected engine handle and probe port
    pub fn new(engine: Arc<SharedEngine>, probe: Arc<dyn ProbePort>) -> Self {
        Self {
            engine,
            probe,
            session: Arc::new(Mutex::new(CompressionSession::new())),
            extra_observers: Mutex::new(Vec::new()),
            subscribed: AtomicBool::new(false),
        }
    }

    /// Register an additional engine observer (terminal or JSON output)
    ///
    /// Must be called before the first compression starts.
    pub fn add_observer(&self, observer: Arc<dyn EngineObserver>) {
        if let Ok(mut observers) = self.extra_observers.lock() {
            observers.push(observer);
        }
    }

    /// Snapshot of the current session state
    pub fn session(&self) -> CompressionSession {
        self.session
            .lock()
            .map(|session| session.clone())
            .unwrap_or_default()
    }

    fn lock_session(&self) -> Result<MutexGuard<'_, CompressionSession>, DomainError> {
        self.session
            .lock()
            .map_err(|_| DomainError::InternalError("session lock poisoned".to_string()))
    }

    /// Select a source file for the next compression attempt
    pub fn select_file(&self, path: &Path) -> Result<(), DomainError> {
        let file = SourceFile::from_path(path)?;
        info!("Selected source {} ({:.2} MB)", file.name, file.size_mb());
        self.lock_session()?.select_source(file)
    }

    /// Run one compression session against the selected source
    ///
    /// On success the session is `Completed` and holds the result handle; on
    /// failure it is `Error` with a single aggregated message.
    pub async fn compress(&self, target_size_mb: u32) -> Result<EncodedOutput, DomainError> {
        if target_size_mb == 0 {
            return Err(DomainError::BadArgs(
                "Target size must be positive".to_string(),
            ));
        }

        let source = {
            let mut session = self.lock_session()?;
            session.begin_loading()?;
            session.push_log("Initializing engine...");
            session
                .source
                .clone()
                .ok_or_else(|| DomainError::InternalError("source vanished".to_string()))?
        };

        match self.run_pipeline(&source, target_size_mb).await {
            Ok(output) => {
                self.lock_session()?.complete(output.clone())?;
                info!(
                    "Compression completed: {} ({} bytes)",
                    output.suggested_name,
                    output.size()
                );
                Ok(output)
            }
            Err(e) => {
                error!("Compression failed: {}", e);
                let message = match &e {
                    DomainError::EngineUnavailable(_) => ENGINE_LOAD_FAILED_MESSAGE,
                    _ => COMPRESSION_FAILED_MESSAGE,
                };
                if let Ok(mut session) = self.session.lock() {
                    session.fail(message);
                }
                Err(e)
            }
        }
    }

    async fn run_pipeline(
        &self,
        source: &SourceFile,
        target_size_mb: u32,
    ) -> Result<EncodedOutput, DomainError> {
        let engine = self.engine.acquire().await?;
        self.subscribe_once(&engine);

        {
            let mut session = self.lock_session()?;
            session.begin_processing()?;
            session.push_log("Calculating best bitrate...");
        }

        let duration = self.probe.probe_duration(&source.path).await?;
        if duration <= 0.0 {
            return Err(DomainError::ProbeFailed(format!(
                "Source reports no usable duration: {}",
                source.path.display()
            )));
        }
        info!("Probed source duration: {:.2}s", duration);

        let bitrate = BitratePlanner::video_bitrate(target_size_mb as f64, duration);
        info!(
            "Targeting {}MB with video bitrate {} bps",
            target_size_mb, bitrate
        );
        self.lock_session()?
            .push_log(format!("Starting encoding at {} kbps...", bitrate / 1000));

        let bytes = tokio::fs::read(&source.path)
            .await
            .map_err(|e| DomainError::FsFail(format!("Failed to read source: {}", e)))?;
        engine.write_input(INPUT_NAME, &bytes).await?;

        engine.execute(&EncodeCommand::new(bitrate).argv()).await?;

        let encoded = engine.read_output(OUTPUT_NAME).await?;
        Ok(EncodedOutput::new(encoded, &source.name))
    }

    fn subscribe_once(&self, engine: &Arc<dyn EnginePort>) {
        if self.subscribed.swap(true, Ordering::SeqCst) {
            return;
        }
        engine.subscribe(Arc::new(SessionObserver {
            session: Arc::clone(&self.session),
        }));
        if let Ok(observers) = self.extra_observers.lock() {
            for observer in observers.iter() {
                engine.subscribe(Arc::clone(observer));
            }
        }
    }

    /// Reset the session to its initial state, releasing any held result
    ///
    /// The shared engine handle persists for reuse by the next session.
    pub fn reset(&self) {
        if let Ok(mut session) = self.session.lock() {
            session.reset();
        }
    }
}
