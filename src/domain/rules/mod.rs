// Domain rules - Business logic and policies

/// Fixed audio bitrate in bits per second
pub const AUDIO_BITRATE: u64 = 128_000;

/// Share of the byte budget reserved for container/muxing overhead
pub const CONTAINER_OVERHEAD_RESERVE: f64 = 0.05;

/// Nominal video bitrate when audio alone consumes the whole target
pub const FLOOR_VIDEO_BITRATE: u64 = 50_000;

/// Minimum video bitrate for a non-degenerate encode
pub const MIN_VIDEO_BITRATE: u64 = 100_000;

/// Fixed input name in the engine's addressable filesystem
pub const INPUT_NAME: &str = "input.mp4";

/// Fixed output name in the engine's addressable filesystem
pub const OUTPUT_NAME: &str = "output.mp4";

/// Video encoder preset favoring speed over compression efficiency
pub const ENCODER_SPEED_PRESET: &str = "veryfast";

/// Business rules for size-targeted bitrate allocation
pub struct BitratePlanner;

impl BitratePlanner {
    /// Derive the video bitrate (bits per second) that keeps the total
    /// encoded size under the target.
    ///
    /// Audio contributes a fixed [`AUDIO_BITRATE`] to the byte budget, so its
    /// share is subtracted before allocating the remainder to video;
    /// otherwise the output would overshoot the target as duration grows.
    /// A slice of the budget is reserved for container overhead.
    ///
    /// Preconditions: `target_size_mb > 0` and `duration_seconds > 0`; the
    /// caller guards both. Always returns a positive bitrate.
    pub fn video_bitrate(target_size_mb: f64, duration_seconds: f64) -> u64 {
        debug_assert!(target_size_mb > 0.0, "target size must be positive");
        debug_assert!(duration_seconds > 0.0, "duration must be positive");

        let total_target_bits = target_size_mb * 1024.0 * 1024.0 * 8.0;
        let audio_bits = AUDIO_BITRATE as f64 * duration_seconds;
        let video_budget_bits = (total_target_bits - audio_bits) * (1.0 - CONTAINER_OVERHEAD_RESERVE);

        if video_budget_bits <= 0.0 {
            // Audio alone exceeds the target; give video a nominal minimum
            // instead of a zero or negative rate.
            return FLOOR_VIDEO_BITRATE;
        }

        let bitrate = (video_budget_bits / duration_seconds).floor() as u64;
        bitrate.max(MIN_VIDEO_BITRATE)
    }
}

/// One encode command against the engine's addressable filesystem
///
/// The argument vector is the engine's command-line contract and must stay
/// stable: H.264 video at the computed bitrate with a max-rate equal to the
/// bitrate and a buffer of twice the bitrate, AAC audio at the fixed rate,
/// reading [`INPUT_NAME`] and writing [`OUTPUT_NAME`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeCommand {
    pub video_bitrate: u64,
}

impl EncodeCommand {
    /// Create an encode command for the given video bitrate
    pub fn new(video_bitrate: u64) -> Self {
        Self { video_bitrate }
    }

    /// Build the engine argument vector
    pub fn argv(&self) -> Vec<String> {
        let bitrate = self.video_bitrate.to_string();
        let bufsize = (self.video_bitrate * 2).to_string();
        let audio_bitrate = format!("{}k", AUDIO_BITRATE / 1000);

        vec![
            "-i".to_string(),
            INPUT_NAME.to_string(),
            "-c:v".to_string(),
            "libx264".to_string(),
            "-b:v".to_string(),
            bitrate.clone(),
            "-maxrate".to_string(),
            bitrate,
            "-bufsize".to_string(),
            bufsize,
            "-preset".to_string(),
            ENCODER_SPEED_PRESET.to_string(),
            "-c:a".to_string(),
            "aac".to_string(),
            "-b:a".to_string(),
            audio_bitrate,
            OUTPUT_NAME.to_string(),
        ]
    }
}
