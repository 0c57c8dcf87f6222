// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod observers;
pub mod probe_ffprobe;

// Re-export adapters
pub use exec_ffmpeg::FfmpegExecAdapter;
pub use observers::{ConsoleProgressObserver, JsonProgressObserver};
pub use probe_ffprobe::FfprobeAdapter;
