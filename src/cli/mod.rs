//! CLI module for Squeeze
//!
//! This module handles command-line argument parsing and command execution.

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// Squeeze CLI Video Compressor
///
/// Compresses a video to fit under a target file size, entirely on the local
/// machine.
#[derive(Parser)]
#[command(name = "squeeze")]
#[command(about = "Squeeze CLI - Compress videos to a target file size")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Compress a video to fit a target size
    Compress(args::CompressArgs),
    /// Inspect video file information
    Inspect(args::InspectArgs),
    /// List the available size presets
    Presets(args::PresetsArgs),
}
