//! Command implementations

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::adapters::{ConsoleProgressObserver, FfprobeAdapter, JsonProgressObserver};
use crate::app::container::AppContainer;
use crate::cli::args::{CompressArgs, InspectArgs, PresetsArgs};
use crate::domain::model::{CompressionPreset, SourceFile, VideoMetadata, PRESETS};
use crate::output::OutputWriter;
use crate::ports::ProbePort;

/// Execute the compress command
pub async fn compress(args: CompressArgs) -> Result<()> {
    let target_size_mb = resolve_target_size(&args)?;

    info!("Starting compress operation");
    info!("Input: {}", args.input.display());
    info!("Target size: {}MB", target_size_mb);

    let container = AppContainer::new(args.ffmpeg.clone(), args.ffprobe.clone());
    let interactor = container.compress_interactor();

    if args.json {
        interactor.add_observer(Arc::new(JsonProgressObserver::new()));
    } else {
        interactor.add_observer(Arc::new(ConsoleProgressObserver::new(args.verbose)));
    }

    if let Err(e) = interactor.select_file(&args.input) {
        if let Some(message) = interactor.session().error {
            eprintln!("{}", message);
        }
        return Err(e).context("File selection failed");
    }

    match interactor.compress(target_size_mb).await {
        Ok(output) => {
            let destination = args
                .output
                .unwrap_or_else(|| default_output_path(&args.input, &output.suggested_name));
            let written = OutputWriter::new()
                .write(&output, &destination)
                .context("Failed to write output file")?;

            println!(
                "Compression complete: {} ({:.2} MB, fits the {}MB limit)",
                destination.display(),
                written as f64 / (1024.0 * 1024.0),
                target_size_mb
            );
            Ok(())
        }
        Err(e) => {
            if let Some(message) = interactor.session().error {
                eprintln!("{}", message);
            }
            Err(e).context("Compression failed")
        }
    }
}

/// Execute the inspect command
pub async fn inspect(args: InspectArgs) -> Result<()> {
    info!("Starting inspect operation");
    info!("Input: {}", args.input.display());

    let source = SourceFile::from_path(&args.input).context("Failed to read input file")?;
    let probe = FfprobeAdapter::new(args.ffprobe.clone());
    let metadata = probe
        .probe_duration(&source.path)
        .await
        .map(|duration| VideoMetadata { duration })
        .context("Failed to probe input file")?;

    if args.json {
        let json = serde_json::json!({
            "name": source.name,
            "size_bytes": source.size,
            "media_type": source.media_type,
            "duration_seconds": metadata.duration,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!("Media Information");
        println!("=================");
        println!("File: {}", source.name);
        println!("Size: {:.2} MB", source.size_mb());
        println!("Type: {}", source.media_type);
        println!("Duration: {:.3}s", metadata.duration);
    }

    Ok(())
}

/// Execute the presets command
pub fn presets(args: PresetsArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(PRESETS)?);
    } else {
        println!("Available presets");
        println!("=================");
        for preset in PRESETS {
            println!(
                "{} {:<12} {:>3}MB  {} - {}",
                preset.icon, preset.id, preset.target_size_mb, preset.name, preset.description
            );
        }
    }
    Ok(())
}

/// Resolve the target size from preset/size arguments
fn resolve_target_size(args: &CompressArgs) -> Result<u32> {
    if let Some(id) = &args.preset {
        let preset = CompressionPreset::by_id(id)
            .ok_or_else(|| anyhow::anyhow!("Unknown preset '{}'; run `squeeze presets`", id))?;
        return Ok(preset.target_size_mb);
    }
    if let Some(size_mb) = args.size_mb {
        if size_mb == 0 {
            anyhow::bail!("--size-mb must be positive");
        }
        return Ok(size_mb);
    }
    Ok(CompressionPreset::default_preset().target_size_mb)
}

/// Default output path: the suggested download name next to the input
fn default_output_path(input: &Path, suggested_name: &str) -> PathBuf {
    input
        .parent()
        .map(|parent| parent.join(suggested_name))
        .unwrap_or_else(|| PathBuf::from(suggested_name))
}
