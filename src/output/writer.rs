//! Output file writer implementation

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::domain::model::EncodedOutput;
use crate::error::{SqueezeError, SqueezeResult};

/// Writes result handles to disk
pub struct OutputWriter;

impl OutputWriter {
    /// Create a new output writer
    pub fn new() -> Self {
        Self
    }

    /// Write the encoded output atomically (temporary file plus rename)
    pub fn write(&self, output: &EncodedOutput, path: &Path) -> SqueezeResult<u64> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        temp.write_all(output.bytes())?;
        temp.flush()?;
        temp.persist(path).map_err(|e| SqueezeError::OutputError {
            message: format!("Failed to move output into place: {}", e),
        })?;

        info!("Output written: {} ({} bytes)", path.display(), output.size());
        Ok(output.size())
    }
}

impl Default for OutputWriter {
    fn default() -> Self {
        Self::new()
    }
}
