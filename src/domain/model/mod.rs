// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::domain::errors::DomainError;

/// Maximum accepted input size in megabytes
pub const MAX_INPUT_SIZE_MB: u64 = 500;

/// Number of log lines a session retains, most recent first
pub const SESSION_LOG_CAPACITY: usize = 5;

/// A size-targeting compression preset
///
/// Presets form a static catalog and are never mutated at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompressionPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub target_size_mb: u32,
    pub description: &'static str,
    pub icon: &'static str,
}

/// Static preset catalog
pub const PRESETS: &[CompressionPreset] = &[
    CompressionPreset {
        id: "discord-8",
        name: "Discord Basic",
        target_size_mb: 8,
        description: "Perfect for standard Discord accounts.",
        icon: "🎮",
    },
    CompressionPreset {
        id: "email-20",
        name: "Email Standard",
        target_size_mb: 20,
        description: "Safe for most email attachments.",
        icon: "📧",
    },
    CompressionPreset {
        id: "discord-25",
        name: "Discord Nitro",
        target_size_mb: 25,
        description: "The Nitro limit for high-quality sharing.",
        icon: "🚀",
    },
];

impl CompressionPreset {
    /// Look up a preset by its identifier
    pub fn by_id(id: &str) -> Option<&'static CompressionPreset> {
        PRESETS.iter().find(|p| p.id == id)
    }

    /// Resolve a preset matching the given target size, falling back to the
    /// first catalog entry when no preset matches
    pub fn for_target_size(target_size_mb: u32) -> &'static CompressionPreset {
        PRESETS
            .iter()
            .find(|p| p.target_size_mb == target_size_mb)
            .unwrap_or(&PRESETS[0])
    }

    /// The default preset (first catalog entry)
    pub fn default_preset() -> &'static CompressionPreset {
        &PRESETS[0]
    }
}

/// A selected source file: opaque input bytes plus the metadata the
/// selection surface exposes
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub media_type: String,
}

impl SourceFile {
    /// Build a source file description from a path on disk
    pub fn from_path(path: &Path) -> Result<Self, DomainError> {
        let metadata = std::fs::metadata(path)
            .map_err(|_| DomainError::FileNotFound(path.display().to_string()))?;
        if !metadata.is_file() {
            return Err(DomainError::BadArgs(format!(
                "Not a regular file: {}",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| DomainError::BadArgs("Input path has no file name".to_string()))?;

        Ok(Self {
            media_type: media_type_for(path),
            name,
            path: path.to_path_buf(),
            size: metadata.len(),
        })
    }

    /// File size in megabytes
    pub fn size_mb(&self) -> f64 {
        self.size as f64 / (1024.0 * 1024.0)
    }
}

/// Map a file extension to its media type
fn media_type_for(path: &Path) -> String {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        _ => "application/octet-stream",
    }
    .to_string()
}

/// Metadata probed from a source file for one compression attempt
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VideoMetadata {
    /// Duration in seconds
    pub duration: f64,
}

/// Compression session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Idle,
    LoadingEngine,
    Processing,
    Completed,
    Error,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Idle => write!(f, "idle"),
            SessionStatus::LoadingEngine => write!(f, "loading engine"),
            SessionStatus::Processing => write!(f, "processing"),
            SessionStatus::Completed => write!(f, "completed"),
            SessionStatus::Error => write!(f, "error"),
        }
    }
}

/// Handle to an encoded output blob
///
/// Cloning is cheap: the encoded bytes are shared, so the handle can be held
/// by the session and by callers at the same time.
#[derive(Debug, Clone)]
pub struct EncodedOutput {
    data: Arc<Vec<u8>>,
    pub media_type: String,
    pub suggested_name: String,
}

impl EncodedOutput {
    /// Wrap encoded bytes as a downloadable result
    pub fn new(data: Vec<u8>, source_name: &str) -> Self {
        Self {
            data: Arc::new(data),
            media_type: "video/mp4".to_string(),
            suggested_name: format!("compressed_{}", source_name),
        }
    }

    /// Encoded bytes
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Encoded size in bytes
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Transient state bundle for one compression attempt
///
/// Mutated only by the session controller in response to engine events or an
/// explicit reset. The shared engine handle is not part of this state and
/// survives resets.
#[derive(Debug, Clone)]
pub struct CompressionSession {
    pub status: SessionStatus,
    /// Display progress, 0-100
    pub progress: u8,
    /// Bounded log buffer, most recent first
    pub logs: Vec<String>,
    pub source: Option<SourceFile>,
    pub result: Option<EncodedOutput>,
    pub error: Option<String>,
}

impl Default for CompressionSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CompressionSession {
    /// Create an idle session with no source selected
    pub fn new() -> Self {
        Self {
            status: SessionStatus::Idle,
            progress: 0,
            logs: Vec::new(),
            source: None,
            result: None,
            error: None,
        }
    }

    /// Select a source file, validating it against the input ceiling
    ///
    /// An oversize file leaves the session `Idle` with a surfaced error. A
    /// valid selection clears any prior result, error, progress and logs.
    pub fn select_source(&mut self, file: SourceFile) -> Result<(), DomainError> {
        if self.status != SessionStatus::Idle {
            return Err(DomainError::InvalidState(format!(
                "Cannot select a file while the session is {}",
                self.status
            )));
        }

        if file.size > MAX_INPUT_SIZE_MB * 1024 * 1024 {
            let message = format!(
                "File is too large! Maximum allowed size is {}MB.",
                MAX_INPUT_SIZE_MB
            );
            self.error = Some(message.clone());
            return Err(DomainError::FileTooLarge(message));
        }

        self.source = Some(file);
        self.error = None;
        self.result = None;
        self.progress = 0;
        self.logs.clear();
        Ok(())
    }

    /// Transition `Idle` -> `LoadingEngine`; requires a selected source
    pub fn begin_loading(&mut self) -> Result<(), DomainError> {
        if self.status != SessionStatus::Idle {
            return Err(DomainError::InvalidState(format!(
                "Cannot start compression while the session is {}",
                self.status
            )));
        }
        if self.source.is_none() {
            return Err(DomainError::BadArgs("No source file selected".to_string()));
        }
        self.status = SessionStatus::LoadingEngine;
        Ok(())
    }

    /// Transition `LoadingEngine` -> `Processing`
    pub fn begin_processing(&mut self) -> Result<(), DomainError> {
        if self.status != SessionStatus::LoadingEngine {
            return Err(DomainError::InvalidState(format!(
                "Cannot begin processing while the session is {}",
                self.status
            )));
        }
        self.status = SessionStatus::Processing;
        Ok(())
    }

    /// Transition `Processing` -> `Completed`, exposing the result handle
    pub fn complete(&mut self, output: EncodedOutput) -> Result<(), DomainError> {
        if self.status != SessionStatus::Processing {
            return Err(DomainError::InvalidState(format!(
                "Cannot complete while the session is {}",
                self.status
            )));
        }
        self.result = Some(output);
        self.status = SessionStatus::Completed;
        Ok(())
    }

    /// Transition any state -> `Error` with a user-facing message
    ///
    /// No partial result survives a failure.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.result = None;
        self.status = SessionStatus::Error;
    }

    /// Reset to the initial state, releasing any held result
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Prepend a log line, truncating to the retained capacity
    pub fn push_log(&mut self, line: impl Into<String>) {
        self.logs.insert(0, line.into());
        self.logs.truncate(SESSION_LOG_CAPACITY);
    }

    /// Map an engine progress fraction (0..1) to the 0-100 display value
    pub fn set_progress(&mut self, fraction: f64) {
        self.progress = (fraction * 100.0).round().clamp(0.0, 100.0) as u8;
    }

    /// Whether the session has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, SessionStatus::Completed | SessionStatus::Error)
    }
}
