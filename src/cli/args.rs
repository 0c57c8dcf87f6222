//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for the compress command
#[derive(Args, Debug)]
pub struct CompressArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file path (default: compressed_<input name> next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Size preset id (see `squeeze presets`)
    #[arg(long, conflicts_with = "size_mb")]
    pub preset: Option<String>,

    /// Explicit target size in megabytes
    #[arg(long)]
    pub size_mb: Option<u32>,

    /// Path to the ffmpeg binary (default: resolved from PATH)
    #[arg(long, env = "SQUEEZE_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// Path to the ffprobe binary (default: resolved from PATH)
    #[arg(long, env = "SQUEEZE_FFPROBE")]
    pub ffprobe: Option<PathBuf>,

    /// Print engine log lines while encoding
    #[arg(long)]
    pub verbose: bool,

    /// Emit progress as JSON events instead of a progress bar
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to the ffprobe binary (default: resolved from PATH)
    #[arg(long, env = "SQUEEZE_FFPROBE")]
    pub ffprobe: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the presets command
#[derive(Args, Debug)]
pub struct PresetsArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
