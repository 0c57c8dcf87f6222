//! FFmpeg execution adapter
//!
//! Drives an `ffmpeg` subprocess as the transcoding engine. A private
//! staging directory plays the role of the engine's addressable filesystem,
//! and progress fractions are recovered from the encoder's own log stream.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::domain::errors::DomainError;
use crate::engine::EngineSettings;
use crate::ports::{EngineObserver, EnginePort};

/// How many trailing log lines to keep for failure reporting
const LOG_TAIL_LINES: usize = 8;

struct LoadedEngine {
    ffmpeg: PathBuf,
    staging: TempDir,
}

/// FFmpeg-based engine adapter
pub struct FfmpegExecAdapter {
    settings: EngineSettings,
    state: Mutex<Option<LoadedEngine>>,
    observers: Mutex<Vec<Arc<dyn EngineObserver>>>,
}

impl FfmpegExecAdapter {
    /// Create an idle adapter; [`EnginePort::load`] performs the actual
    /// initialization
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            state: Mutex::new(None),
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Resolve the engine binary from settings or PATH
    fn resolve_binary(&self) -> Result<PathBuf, DomainError> {
        match &self.settings.ffmpeg_path {
            Some(path) if path.is_file() => Ok(path.clone()),
            Some(path) => Err(DomainError::EngineUnavailable(format!(
                "No ffmpeg binary at {}",
                path.display()
            ))),
            None => which::which("ffmpeg").map_err(|e| {
                DomainError::EngineUnavailable(format!("ffmpeg not found on PATH: {}", e))
            }),
        }
    }

    fn loaded_paths(&self) -> Result<(PathBuf, PathBuf), DomainError> {
        let state = self
            .state
            .lock()
            .map_err(|_| DomainError::InternalError("engine state lock poisoned".to_string()))?;
        let loaded = state
            .as_ref()
            .ok_or_else(|| DomainError::EngineUnavailable("Engine not loaded".to_string()))?;
        Ok((loaded.ffmpeg.clone(), loaded.staging.path().to_path_buf()))
    }

    fn observers_snapshot(&self) -> Vec<Arc<dyn EngineObserver>> {
        self.observers
            .lock()
            .map(|observers| observers.clone())
            .unwrap_or_default()
    }

    fn emit_log(&self, message: &str) {
        for observer in self.observers_snapshot() {
            observer.on_log(message);
        }
    }

    fn emit_progress(&self, fraction: f64) {
        for observer in self.observers_snapshot() {
            observer.on_progress(fraction);
        }
    }
}

#[async_trait]
impl EnginePort for FfmpegExecAdapter {
    async fn load(&self) -> Result<(), DomainError> {
        {
            let state = self.state.lock().map_err(|_| {
                DomainError::InternalError("engine state lock poisoned".to_string())
            })?;
            if state.is_some() {
                return Ok(());
            }
        }

        let ffmpeg = self.resolve_binary()?;

        // Verify the runtime answers before accepting it
        let output = Command::new(&ffmpeg)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                DomainError::EngineUnavailable(format!(
                    "Failed to run {}: {}",
                    ffmpeg.display(),
                    e
                ))
            })?;
        if !output.status.success() {
            return Err(DomainError::EngineUnavailable(format!(
                "{} did not report a version ({})",
                ffmpeg.display(),
                output.status
            )));
        }
        let banner = String::from_utf8_lossy(&output.stdout);
        info!(
            "Engine runtime: {}",
            banner.lines().next().unwrap_or("ffmpeg")
        );

        let staging = TempDir::new().map_err(|e| {
            DomainError::FsFail(format!("Failed to create engine staging directory: {}", e))
        })?;
        debug!("Engine staging directory: {}", staging.path().display());

        let mut state = self
            .state
            .lock()
            .map_err(|_| DomainError::InternalError("engine state lock poisoned".to_string()))?;
        *state = Some(LoadedEngine { ffmpeg, staging });
        Ok(())
    }

    async fn write_input(&self, name: &str, bytes: &[u8]) -> Result<(), DomainError> {
        let (_, staging) = self.loaded_paths()?;
        tokio::fs::write(staging.join(name), bytes)
            .await
            .map_err(|e| DomainError::FsFail(format!("Failed to stage input {}: {}", name, e)))
    }

    async fn read_output(&self, name: &str) -> Result<Vec<u8>, DomainError> {
        let (_, staging) = self.loaded_paths()?;
        tokio::fs::read(staging.join(name))
            .await
            .map_err(|e| DomainError::EncodeFailed(format!("Failed to read output {}: {}", name, e)))
    }

    async fn execute(&self, args: &[String]) -> Result<(), DomainError> {
        let (ffmpeg, staging) = self.loaded_paths()?;
        debug!("Executing engine command: {:?}", args);

        let mut child = Command::new(&ffmpeg)
            .current_dir(&staging)
            // Plumbing flags only; the argument vector itself is the
            // caller's contract and passes through untouched.
            .arg("-hide_banner")
            .arg("-nostdin")
            .arg("-y")
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| DomainError::EncodeFailed(format!("Failed to spawn engine: {}", e)))?;

        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| DomainError::InternalError("engine stderr not captured".to_string()))?;

        // The encoder terminates stats lines with carriage returns, so split
        // on both CR and LF while streaming.
        let mut total_duration: Option<f64> = None;
        let mut tail: Vec<String> = Vec::new();
        let mut pending: Vec<u8> = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = stderr.read(&mut buf).await.map_err(|e| {
                DomainError::EncodeFailed(format!("Failed to read engine log stream: {}", e))
            })?;
            if n == 0 {
                break;
            }
            for &byte in &buf[..n] {
                if byte == b'\n' || byte == b'\r' {
                    if pending.is_empty() {
                        continue;
                    }
                    let line = String::from_utf8_lossy(&pending).trim().to_string();
                    pending.clear();
                    if line.is_empty() {
                        continue;
                    }

                    self.emit_log(&line);
                    if total_duration.is_none() {
                        total_duration = extract_duration(&line);
                    }
                    if let (Some(total), Some(position)) = (total_duration, extract_time(&line)) {
                        if total > 0.0 {
                            self.emit_progress((position / total).min(1.0));
                        }
                    }

                    tail.push(line);
                    if tail.len() > LOG_TAIL_LINES {
                        tail.remove(0);
                    }
                } else {
                    pending.push(byte);
                }
            }
        }

        let status = child.wait().await.map_err(|e| {
            DomainError::EncodeFailed(format!("Failed to wait for engine: {}", e))
        })?;
        if !status.success() {
            warn!("Engine command failed with {}", status);
            return Err(DomainError::EncodeFailed(format!(
                "Engine exited with {}: {}",
                status,
                tail.join(" | ")
            )));
        }

        self.emit_progress(1.0);
        Ok(())
    }

    fn subscribe(&self, observer: Arc<dyn EngineObserver>) {
        if let Ok(mut observers) = self.observers.lock() {
            observers.push(observer);
        }
    }
}

/// Parse an "HH:MM:SS.cc" clock string to seconds
fn parse_clock(value: &str) -> Option<f64> {
    let parts: Vec<&str> = value.split(':').collect();
    if parts.len() != 3 {
        return None;
    }
    let hours: f64 = parts[0].parse().ok()?;
    let minutes: f64 = parts[1].parse().ok()?;
    let seconds: f64 = parts[2].parse().ok()?;
    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}

/// Extract the input duration from a "Duration: 00:01:00.00, start: ..." line
fn extract_duration(line: &str) -> Option<f64> {
    let prefix = "Duration:";
    let idx = line.find(prefix)?;
    let rest = line[idx + prefix.len()..].trim_start();
    let end = rest.find(',').unwrap_or(rest.len());
    parse_clock(rest[..end].trim())
}

/// Extract the encode position from a stats line like "... time=00:00:30.00 ..."
fn extract_time(line: &str) -> Option<f64> {
    let prefix = "time=";
    let idx = line.find(prefix)?;
    let rest = &line[idx + prefix.len()..];
    let end = rest.find(' ').unwrap_or(rest.len());
    parse_clock(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clock() {
        assert_eq!(parse_clock("00:00:30.00"), Some(30.0));
        assert_eq!(parse_clock("01:02:03.50"), Some(3723.5));
        assert_eq!(parse_clock("30.0"), None);
        assert_eq!(parse_clock("xx:yy:zz"), None);
    }

    #[test]
    fn test_extract_duration() {
        let line = "  Duration: 00:01:00.05, start: 0.000000, bitrate: 1205 kb/s";
        assert_eq!(extract_duration(line), Some(60.05));
        assert_eq!(extract_duration("no duration here"), None);
    }

    #[test]
    fn test_extract_time() {
        let line = "frame=  900 fps=310 q=28.0 size=    5376KiB time=00:00:30.00 bitrate=1467.6kbits/s speed=10.3x";
        assert_eq!(extract_time(line), Some(30.0));
        assert_eq!(extract_time("frame=  900 fps=310"), None);
    }
}
