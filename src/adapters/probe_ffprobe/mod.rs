//! FFprobe adapter for media duration probing

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::domain::errors::DomainError;
use crate::ports::ProbePort;

/// Upper bound on one probe invocation; a file the decoder cannot probe
/// fails the session instead of hanging it
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// FFprobe-based probe adapter
pub struct FfprobeAdapter {
    ffprobe_path: Option<PathBuf>,
}

impl FfprobeAdapter {
    /// Create a probe adapter, optionally pinned to an explicit binary
    pub fn new(ffprobe_path: Option<PathBuf>) -> Self {
        Self { ffprobe_path }
    }

    fn resolve_binary(&self) -> Result<PathBuf, DomainError> {
        match &self.ffprobe_path {
            Some(path) if path.is_file() => Ok(path.clone()),
            Some(path) => Err(DomainError::EngineUnavailable(format!(
                "No ffprobe binary at {}",
                path.display()
            ))),
            None => which::which("ffprobe").map_err(|e| {
                DomainError::EngineUnavailable(format!("ffprobe not found on PATH: {}", e))
            }),
        }
    }
}

#[async_trait]
impl ProbePort for FfprobeAdapter {
    async fn probe_duration(&self, path: &Path) -> Result<f64, DomainError> {
        let ffprobe = self.resolve_binary()?;

        let mut command = Command::new(&ffprobe);
        command
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(path)
            .stdin(Stdio::null());

        let output = timeout(PROBE_TIMEOUT, command.output())
            .await
            .map_err(|_| {
                DomainError::ProbeFailed(format!(
                    "Probe timed out after {}s: {}",
                    PROBE_TIMEOUT.as_secs(),
                    path.display()
                ))
            })?
            .map_err(|e| DomainError::ProbeFailed(format!("Failed to run ffprobe: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DomainError::ProbeFailed(format!(
                "ffprobe exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let duration: f64 = text.parse().map_err(|_| {
            DomainError::ProbeFailed(format!("Unparsable duration {:?} for {}", text, path.display()))
        })?;
        if !duration.is_finite() || duration <= 0.0 {
            return Err(DomainError::ProbeFailed(format!(
                "Source reports no usable duration ({}): {}",
                duration,
                path.display()
            )));
        }

        debug!("Probed duration {:.3}s for {}", duration, path.display());
        Ok(duration)
    }
}
