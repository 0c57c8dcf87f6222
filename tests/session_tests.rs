//! Integration tests for the compression session controller
//!
//! The engine and probe are replaced with in-memory fakes implementing the
//! same ports, so the full session lifecycle runs without a real FFmpeg.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use squeeze_cli::app::CompressInteractor;
use squeeze_cli::domain::errors::DomainError;
use squeeze_cli::domain::model::{SessionStatus, MAX_INPUT_SIZE_MB};
use squeeze_cli::engine::SharedEngine;
use squeeze_cli::ports::{EngineObserver, EnginePort, ProbePort};

// Test doubles

#[derive(Default)]
struct MockEngineBehavior {
    fail_load: bool,
    fail_execute: bool,
    /// Log lines emitted during execute
    log_lines: Vec<String>,
}

struct MockEngine {
    behavior: MockEngineBehavior,
    output: Vec<u8>,
    load_calls: AtomicUsize,
    executed: Mutex<Vec<Vec<String>>>,
    inputs: Mutex<HashMap<String, Vec<u8>>>,
    observers: Mutex<Vec<Arc<dyn EngineObserver>>>,
}

impl MockEngine {
    fn new(output: Vec<u8>) -> Self {
        Self::with_behavior(output, MockEngineBehavior::default())
    }

    fn with_behavior(output: Vec<u8>, behavior: MockEngineBehavior) -> Self {
        Self {
            behavior,
            output,
            load_calls: AtomicUsize::new(0),
            executed: Mutex::new(Vec::new()),
            inputs: Mutex::new(HashMap::new()),
            observers: Mutex::new(Vec::new()),
        }
    }

    fn load_count(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    fn executed_commands(&self) -> Vec<Vec<String>> {
        self.executed.lock().unwrap().clone()
    }

    fn staged_input(&self, name: &str) -> Option<Vec<u8>> {
        self.inputs.lock().unwrap().get(name).cloned()
    }

    fn observers_snapshot(&self) -> Vec<Arc<dyn EngineObserver>> {
        self.observers.lock().unwrap().clone()
    }
}

#[async_trait]
impl EnginePort for MockEngine {
    async fn load(&self) -> Result<(), DomainError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        if self.behavior.fail_load {
            return Err(DomainError::EngineUnavailable(
                "mock engine refused to load".to_string(),
            ));
        }
        Ok(())
    }

    async fn write_input(&self, name: &str, bytes: &[u8]) -> Result<(), DomainError> {
        self.inputs
            .lock()
            .unwrap()
            .insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn read_output(&self, name: &str) -> Result<Vec<u8>, DomainError> {
        if name == "output.mp4" {
            Ok(self.output.clone())
        } else {
            Err(DomainError::EncodeFailed(format!("no such output: {}", name)))
        }
    }

    async fn execute(&self, args: &[String]) -> Result<(), DomainError> {
        self.executed.lock().unwrap().push(args.to_vec());

        for observer in self.observers_snapshot() {
            for line in &self.behavior.log_lines {
                observer.on_log(line);
            }
            observer.on_progress(0.25);
            observer.on_progress(0.5);
            observer.on_progress(1.0);
        }

        if self.behavior.fail_execute {
            return Err(DomainError::EncodeFailed("mock encode blew up".to_string()));
        }
        Ok(())
    }

    fn subscribe(&self, observer: Arc<dyn EngineObserver>) {
        self.observers.lock().unwrap().push(observer);
    }
}

struct MockProbe {
    duration: f64,
}

#[async_trait]
impl ProbePort for MockProbe {
    async fn probe_duration(&self, _path: &Path) -> Result<f64, DomainError> {
        Ok(self.duration)
    }
}

fn interactor_with(
    engine: Arc<MockEngine>,
    duration: f64,
) -> CompressInteractor {
    let shared = Arc::new(SharedEngine::new(engine as Arc<dyn EnginePort>));
    CompressInteractor::new(shared, Arc::new(MockProbe { duration }))
}

fn write_source(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

// Tests

#[tokio::test]
async fn test_end_to_end_eight_mb_preset() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "movie.mp4", &[1u8; 1024]);

    let engine = Arc::new(MockEngine::new(vec![7u8; 2048]));
    let interactor = interactor_with(Arc::clone(&engine), 60.0);

    interactor.select_file(&input).unwrap();
    let output = interactor.compress(8).await.unwrap();

    let session = interactor.session();
    assert_eq!(session.status, SessionStatus::Completed);
    assert!(session.result.is_some());
    assert_eq!(session.progress, 100);
    assert!(session.error.is_none());

    assert_eq!(output.suggested_name, "compressed_movie.mp4");
    assert_eq!(output.media_type, "video/mp4");
    assert_eq!(output.size(), 2048);

    // Source bytes staged under the engine's fixed input name
    assert_eq!(engine.staged_input("input.mp4").unwrap().len(), 1024);

    // Exactly one encode, carrying the contract argument vector with the
    // bitrate computed for 8MB over 60s
    let commands = engine.executed_commands();
    assert_eq!(commands.len(), 1);
    let expected: Vec<String> = [
        "-i", "input.mp4", "-c:v", "libx264", "-b:v", "940957", "-maxrate", "940957",
        "-bufsize", "1881914", "-preset", "veryfast", "-c:a", "aac", "-b:a", "128k",
        "output.mp4",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    assert_eq!(commands[0], expected);
}

#[tokio::test]
async fn test_engine_loads_once_across_two_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "clip.mp4", &[2u8; 512]);

    let engine = Arc::new(MockEngine::new(vec![0u8; 128]));
    let shared = Arc::new(SharedEngine::new(
        Arc::clone(&engine) as Arc<dyn EnginePort>
    ));
    let interactor =
        CompressInteractor::new(Arc::clone(&shared), Arc::new(MockProbe { duration: 30.0 }));
    assert!(!shared.is_loaded());

    interactor.select_file(&input).unwrap();
    interactor.compress(8).await.unwrap();
    assert_eq!(interactor.session().status, SessionStatus::Completed);
    assert!(shared.is_loaded());

    // Reset releases the result but keeps the engine handle warm
    interactor.reset();
    let session = interactor.session();
    assert_eq!(session.status, SessionStatus::Idle);
    assert!(session.result.is_none());

    interactor.select_file(&input).unwrap();
    interactor.compress(20).await.unwrap();
    assert_eq!(interactor.session().status, SessionStatus::Completed);

    assert_eq!(engine.load_count(), 1);
    assert_eq!(engine.executed_commands().len(), 2);
}

#[tokio::test]
async fn test_encode_failure_surfaces_single_aggregated_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "clip.mp4", &[3u8; 256]);

    let engine = Arc::new(MockEngine::with_behavior(
        Vec::new(),
        MockEngineBehavior {
            fail_execute: true,
            ..Default::default()
        },
    ));
    let interactor = interactor_with(Arc::clone(&engine), 45.0);

    interactor.select_file(&input).unwrap();
    let result = interactor.compress(8).await;
    assert!(result.is_err());

    let session = interactor.session();
    assert_eq!(session.status, SessionStatus::Error);
    assert!(session.result.is_none());
    let message = session.error.unwrap();
    assert!(message.contains("error occurred during compression"));
}

#[tokio::test]
async fn test_engine_load_failure_surfaces_guidance() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "clip.mp4", &[4u8; 256]);

    let engine = Arc::new(MockEngine::with_behavior(
        Vec::new(),
        MockEngineBehavior {
            fail_load: true,
            ..Default::default()
        },
    ));
    let interactor = interactor_with(Arc::clone(&engine), 45.0);

    interactor.select_file(&input).unwrap();
    assert!(interactor.compress(8).await.is_err());

    let session = interactor.session();
    assert_eq!(session.status, SessionStatus::Error);
    assert!(session.error.unwrap().contains("FFmpeg"));

    // No encode was attempted against the unloaded engine
    assert!(engine.executed_commands().is_empty());
}

#[tokio::test]
async fn test_oversize_selection_never_starts_a_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge.mp4");
    let file = std::fs::File::create(&path).unwrap();
    // Sparse file just past the ceiling; no bytes actually written
    file.set_len((MAX_INPUT_SIZE_MB + 1) * 1024 * 1024).unwrap();

    let engine = Arc::new(MockEngine::new(Vec::new()));
    let interactor = interactor_with(Arc::clone(&engine), 60.0);

    assert!(interactor.select_file(&path).is_err());

    let session = interactor.session();
    assert_eq!(session.status, SessionStatus::Idle);
    assert!(session.error.unwrap().contains("too large"));

    // Compression cannot start without a selected source
    assert!(interactor.compress(8).await.is_err());
    assert_eq!(engine.load_count(), 0);
}

#[tokio::test]
async fn test_session_logs_retain_recent_engine_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "clip.mp4", &[5u8; 256]);

    let log_lines: Vec<String> = (1..=7).map(|i| format!("engine line {}", i)).collect();
    let engine = Arc::new(MockEngine::with_behavior(
        vec![0u8; 16],
        MockEngineBehavior {
            log_lines,
            ..Default::default()
        },
    ));
    let interactor = interactor_with(Arc::clone(&engine), 60.0);

    interactor.select_file(&input).unwrap();
    interactor.compress(8).await.unwrap();

    let session = interactor.session();
    // Only the five most recent lines survive, newest first
    assert_eq!(
        session.logs,
        vec![
            "engine line 7",
            "engine line 6",
            "engine line 5",
            "engine line 4",
            "engine line 3",
        ]
    );
}
