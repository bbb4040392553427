#![warn(missing_docs)]
//! # block-mosaic-app
//!
//! ## Purpose
//! Wires the mosaic transformer to files: decode, transform, encode, report.
//!
//! ## Responsibilities
//! - Resolve run settings (paths, tile size, JPEG quality, report path).
//! - Decode the input through the `image` codec collaborator.
//! - Run the band-by-band transform with a caller-supplied progress observer.
//! - Encode the output and optionally write a JSON run report.
//!
//! ## Data flow
//! [`RunSettings`] -> [`codec::decode_file`] -> [`block_mosaic::MosaicTransformer`]
//! -> [`codec::encode_file`] -> [`RunReport`].
//!
//! ## Ownership and lifetimes
//! The decoded source lives for the duration of [`run`]; the transformer
//! borrows it and hands back an owned output buffer.
//!
//! ## Error model
//! Codec, filesystem, settings and transform failures are wrapped in
//! [`AppError`] with the offending path or value attached.

pub mod codec;
pub mod report;
pub mod settings;

use std::path::PathBuf;
use std::time::Instant;

use block_mosaic::{MosaicConfig, MosaicError, MosaicTransformer, ProgressObserver};
use block_mosaic_core::CoreError;
use thiserror::Error;

pub use report::{RunReport, pixel_digest};
pub use settings::{RunSettings, TileSize, tile_size_from_env};

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("BLOCK_MOSAIC_VERSION");

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Decodes, mosaics and encodes one image.
///
/// Tile geometry is validated before the input is touched. The output file
/// is written only after the final band completes.
///
/// # Errors
/// Returns [`AppError::Mosaic`] for invalid tile sizes or empty images,
/// codec errors for unreadable input or unwritable output, and
/// [`AppError::Io`] when the report cannot be written.
pub fn run(
    settings: &RunSettings,
    observer: &mut dyn ProgressObserver,
) -> Result<RunReport, AppError> {
    let started = Instant::now();
    let config =
        MosaicConfig::new(settings.tile.width, settings.tile.height).map_err(AppError::Mosaic)?;

    let source = codec::decode_file(&settings.input)?;
    tracing::info!(
        stage = "decode",
        action = "complete",
        path = %settings.input.display(),
        width = source.width(),
        height = source.height(),
    );

    let transformer = MosaicTransformer::new(&source, config).map_err(AppError::Mosaic)?;
    let bands = transformer.total_bands();
    let output = transformer.finish(observer);

    codec::encode_file(&output, &settings.output, settings.jpeg_quality)?;
    tracing::info!(
        stage = "encode",
        action = "complete",
        path = %settings.output.display(),
        quality = settings.jpeg_quality,
    );

    let report = RunReport::new(settings, config, &output, bands, started.elapsed());
    if let Some(path) = &settings.report {
        report.write_json(path)?;
        tracing::info!(stage = "report", action = "written", path = %path.display());
    }

    Ok(report)
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Transform configuration or source was rejected.
    #[error("mosaic error: {0}")]
    Mosaic(MosaicError),
    /// Pixel model error.
    #[error("core error: {0}")]
    Core(CoreError),
    /// Input could not be read or decoded.
    #[error("failed to decode {path}: {source}")]
    Decode {
        /// Input path.
        path: PathBuf,
        /// Underlying codec error.
        #[source]
        source: image::ImageError,
    },
    /// Output could not be encoded.
    #[error("failed to encode {path}: {source}")]
    Encode {
        /// Output path.
        path: PathBuf,
        /// Underlying codec error.
        #[source]
        source: image::ImageError,
    },
    /// Output extension names no supported format.
    #[error("unsupported output format for {path}; use .jpg, .jpeg or .png")]
    UnsupportedFormat {
        /// Output path.
        path: PathBuf,
    },
    /// Pixel buffer geometry was rejected by the codec layer.
    #[error("codec rejected {width}x{height} image geometry")]
    ImageShape {
        /// Buffer width.
        width: u32,
        /// Buffer height.
        height: u32,
    },
    /// Tile size string is malformed.
    #[error("invalid tile size {0:?}: expected N or WxH")]
    InvalidTileSize(String),
    /// Filesystem error.
    #[error("i/o error on {path}: {source}")]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Report serialization error.
    #[error("report codec failure: {0}")]
    Report(serde_json::Error),
}
