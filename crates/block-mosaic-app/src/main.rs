#![warn(missing_docs)]
//! # block-mosaic binary
//!
//! Command-line entry point: pixelates one image file.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use block_mosaic::TracingProgress;
use block_mosaic_app::settings::{
    DEFAULT_INPUT, DEFAULT_JPEG_QUALITY, DEFAULT_OUTPUT, TILE_SIZE_ENV,
};
use block_mosaic_app::{RunSettings, TileSize, app_version, tile_size_from_env};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Replace every tile of an image with its average color.
#[derive(Parser, Debug)]
#[command(name = "block-mosaic", version = app_version(), long_about = None)]
struct Args {
    /// Input image path.
    #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Output image path (.jpg, .jpeg or .png).
    #[arg(value_name = "OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Tile size as N or WxH. Falls back to $BLOCK_MOSAIC_TILE_SIZE, then 100.
    #[arg(short, long, value_name = "SIZE")]
    tile: Option<TileSize>,

    /// JPEG quality (1-100).
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_JPEG_QUALITY,
        value_parser = clap::value_parser!(u8).range(1..=100),
        value_name = "INT"
    )]
    quality: u8,

    /// Write a JSON run report to this path.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

/// CLI entry point.
fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    let default_filter = format!("block_mosaic={log_level},block_mosaic_app={log_level}");
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(error) = run(args) {
        tracing::error!("{error:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: Args) -> Result<()> {
    let tile = match args.tile {
        Some(tile) => tile,
        None => tile_size_from_env()
            .with_context(|| format!("failed to read {TILE_SIZE_ENV}"))?
            .unwrap_or_default(),
    };

    let settings = RunSettings {
        input: args.input,
        output: args.output,
        tile,
        jpeg_quality: args.quality,
        report: args.report,
    };
    tracing::info!(
        stage = "startup",
        action = "settings",
        version = app_version(),
        tile = %settings.tile,
    );

    let report = block_mosaic_app::run(&settings, &mut TracingProgress).with_context(|| {
        format!(
            "failed to mosaic {} -> {}",
            settings.input.display(),
            settings.output.display()
        )
    })?;

    tracing::info!(
        stage = "run",
        action = "complete",
        bands = report.bands,
        elapsed_ms = report.elapsed_ms,
        sha256 = %report.output_sha256,
    );
    Ok(())
}
