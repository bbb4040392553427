//! JSON run report written after a successful transform.

use std::path::Path;
use std::time::Duration;

use block_mosaic::MosaicConfig;
use block_mosaic_core::PixelBuffer;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{APP_VERSION, AppError, RunSettings};

/// Canonical schema tag for v1 run reports.
pub const REPORT_SCHEMA_V1: &str = "block-mosaic.run-report.v1";

/// Summary of one completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Report schema version.
    pub schema_version: String,
    /// Version of the binary that produced the report.
    pub app_version: String,
    /// Input path as given.
    pub input: String,
    /// Output path as given.
    pub output: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Tile width in pixels.
    pub tile_width: u32,
    /// Tile height in pixels.
    pub tile_height: u32,
    /// Bands processed.
    pub bands: u32,
    /// Wall time from decode start to encode end.
    pub elapsed_ms: u64,
    /// Hex SHA-256 of the mosaicked pixels, before encoding.
    pub output_sha256: String,
}

impl RunReport {
    /// Builds a report for a finished run.
    pub fn new(
        settings: &RunSettings,
        config: MosaicConfig,
        output: &PixelBuffer,
        bands: u32,
        elapsed: Duration,
    ) -> Self {
        Self {
            schema_version: REPORT_SCHEMA_V1.to_string(),
            app_version: APP_VERSION.to_string(),
            input: settings.input.display().to_string(),
            output: settings.output.display().to_string(),
            width: output.width(),
            height: output.height(),
            tile_width: config.tile_width(),
            tile_height: config.tile_height(),
            bands,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            output_sha256: pixel_digest(output),
        }
    }

    /// Serializes the report to pretty JSON bytes.
    ///
    /// # Errors
    /// Returns [`AppError::Report`] when serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, AppError> {
        serde_json::to_vec_pretty(self).map_err(AppError::Report)
    }

    /// Deserializes a report from JSON bytes.
    ///
    /// # Errors
    /// Returns [`AppError::Report`] when decoding fails.
    pub fn from_json_bytes(raw: &[u8]) -> Result<Self, AppError> {
        serde_json::from_slice(raw).map_err(AppError::Report)
    }

    /// Writes the report as JSON to `path`.
    ///
    /// # Errors
    /// Returns [`AppError::Io`] when the file cannot be written.
    pub fn write_json(&self, path: &Path) -> Result<(), AppError> {
        let bytes = self.to_json_bytes()?;
        std::fs::write(path, bytes).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Hex SHA-256 over the geometry and RGBA bytes of `buffer`.
///
/// Two buffers share a digest only if their dimensions and pixels match.
pub fn pixel_digest(buffer: &PixelBuffer) -> String {
    let mut hasher = Sha256::new();
    hasher.update(buffer.width().to_le_bytes());
    hasher.update(buffer.height().to_le_bytes());
    hasher.update(buffer.as_rgba());
    hex::encode(hasher.finalize())
}
