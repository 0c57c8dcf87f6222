//! Squeeze CLI Video Compressor
//!
//! Compresses a video to fit under a target file size. The size-targeting
//! bitrate is derived from the source duration, with the fixed audio share
//! subtracted and headroom reserved for container overhead.
//!
//! # Usage
//!
//! ```bash
//! squeeze compress --input video.mp4 --preset discord-8
//! squeeze compress --input video.mp4 --size-mb 20 --output small.mp4
//! squeeze inspect --input video.mp4 --json
//! squeeze presets
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use squeeze_cli::cli::{commands, Cli, Commands};

/// Main entry point for the Squeeze CLI application
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let cli = Cli::parse();

    // Execute the requested command
    match cli.command {
        Commands::Compress(args) => {
            info!("Executing compress command");
            commands::compress(args).await?;
        }
        Commands::Inspect(args) => {
            info!("Executing inspect command");
            commands::inspect(args).await?;
        }
        Commands::Presets(args) => {
            commands::presets(args)?;
        }
    }

    Ok(())
}
