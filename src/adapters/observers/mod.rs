// Engine event observers for terminal and structured output

use std::sync::atomic::{AtomicI16, Ordering};

use crate::ports::EngineObserver;

/// Console progress observer for CLI usage
pub struct ConsoleProgressObserver {
    verbose: bool,
    last_percent: AtomicI16,
}

impl ConsoleProgressObserver {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            last_percent: AtomicI16::new(-1),
        }
    }
}

impl EngineObserver for ConsoleProgressObserver {
    fn on_progress(&self, fraction: f64) {
        let percent = (fraction * 100.0).round().clamp(0.0, 100.0) as i16;
        // Only repaint on whole-percent changes
        if self.last_percent.swap(percent, Ordering::Relaxed) == percent {
            return;
        }

        let bar_length = 20;
        let filled = (percent as usize * bar_length) / 100;
        let bar = "█".repeat(filled) + &"░".repeat(bar_length - filled);
        println!("[{}] {:>3}%", bar, percent);
    }

    fn on_log(&self, message: &str) {
        if self.verbose {
            println!("{}", message);
        }
    }
}

/// JSON progress observer for structured output
pub struct JsonProgressObserver;

impl JsonProgressObserver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineObserver for JsonProgressObserver {
    fn on_progress(&self, fraction: f64) {
        let event = serde_json::json!({
            "event": "progress",
            "percent": (fraction * 100.0).round().clamp(0.0, 100.0),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        println!("{}", event);
    }

    fn on_log(&self, message: &str) {
        let event = serde_json::json!({
            "event": "log",
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        println!("{}", event);
    }
}
