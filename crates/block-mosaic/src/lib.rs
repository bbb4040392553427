#![warn(missing_docs)]
//! # block-mosaic
//!
//! ## Purpose
//! Applies a block-mosaic (pixelation) filter: every tile of a configurable
//! size is replaced with its average color.
//!
//! ## Responsibilities
//! - Validate tile geometry before any buffer is allocated.
//! - Stream the source through one reusable working band, one tile-height at
//!   a time.
//! - Average each tile of the band in place and copy the band to the output.
//! - Report per-band progress to an injectable observer.
//!
//! ## Data flow
//! Source [`PixelBuffer`] -> band loader -> working band -> tile averager (in
//! place) -> band writer -> output [`PixelBuffer`], driven by
//! [`MosaicTransformer`] until the source height is covered.
//!
//! ## Ownership and lifetimes
//! The transformer borrows the source read-only for its whole run and owns
//! both the working band and the output. The output is only handed out by
//! [`MosaicTransformer::finish`], after the final band is written.
//!
//! ## Error model
//! Non-positive tile sizes fail with [`MosaicError::InvalidConfiguration`];
//! zero-area sources fail with [`MosaicError::EmptySource`]. Both are
//! reported before allocation. Out-of-bounds pixel access is prevented by
//! clipping every tile to the band's valid region.
//!
//! ## Example
//! ```rust
//! use block_mosaic::transform;
//! use block_mosaic_core::{PixelBuffer, Rgba8};
//!
//! let mut source = PixelBuffer::new(2, 1).unwrap();
//! source.set_pixel(0, 0, Rgba8::new(0, 0, 0, 255));
//! source.set_pixel(1, 0, Rgba8::new(255, 255, 255, 255));
//!
//! let output = transform(&source, 2, 2).unwrap();
//! assert_eq!(output.pixel(0, 0), Rgba8::new(127, 127, 127, 255));
//! assert_eq!(output.pixel(1, 0), output.pixel(0, 0));
//! ```

mod average;
mod band;
mod driver;
mod progress;

use block_mosaic_core::{CoreError, PixelBuffer};
use thiserror::Error;

pub use average::average_color;
pub use driver::MosaicTransformer;
pub use progress::{BandProgress, NoProgress, ProgressLog, ProgressObserver, TracingProgress};

/// Tile size used when the caller does not choose one.
pub const DEFAULT_TILE_SIZE: u32 = 100;

/// Validated tile geometry for one transform run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicConfig {
    tile_width: u32,
    tile_height: u32,
}

impl MosaicConfig {
    /// Creates a validated configuration.
    ///
    /// Sizes larger than `u32::MAX` are saturated; no image can be wider or
    /// taller than that, so the result is identical.
    ///
    /// # Errors
    /// Returns [`MosaicError::InvalidConfiguration`] when either dimension is
    /// zero or negative.
    pub fn new(tile_width: i64, tile_height: i64) -> Result<Self, MosaicError> {
        if tile_width <= 0 || tile_height <= 0 {
            return Err(MosaicError::InvalidConfiguration {
                tile_width,
                tile_height,
            });
        }

        Ok(Self {
            tile_width: u32::try_from(tile_width).unwrap_or(u32::MAX),
            tile_height: u32::try_from(tile_height).unwrap_or(u32::MAX),
        })
    }

    /// Tile width in pixels.
    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    /// Tile height in pixels; also the height of one band.
    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            tile_width: DEFAULT_TILE_SIZE,
            tile_height: DEFAULT_TILE_SIZE,
        }
    }
}

/// Mosaics `source` with `tile_width x tile_height` tiles.
///
/// # Errors
/// Returns [`MosaicError::InvalidConfiguration`] for non-positive tile sizes
/// and [`MosaicError::EmptySource`] for zero-area sources.
pub fn transform(
    source: &PixelBuffer,
    tile_width: i64,
    tile_height: i64,
) -> Result<PixelBuffer, MosaicError> {
    transform_with_progress(source, tile_width, tile_height, &mut NoProgress)
}

/// Same as [`transform`], reporting each completed band to `observer`.
///
/// # Errors
/// Same as [`transform`].
pub fn transform_with_progress(
    source: &PixelBuffer,
    tile_width: i64,
    tile_height: i64,
    observer: &mut dyn ProgressObserver,
) -> Result<PixelBuffer, MosaicError> {
    let config = MosaicConfig::new(tile_width, tile_height)?;
    let transformer = MosaicTransformer::new(source, config)?;
    Ok(transformer.finish(observer))
}

/// Error type for mosaic transforms.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MosaicError {
    /// Tile dimensions must both be strictly positive.
    #[error("invalid tile size {tile_width}x{tile_height}: both dimensions must be positive")]
    InvalidConfiguration {
        /// Requested tile width.
        tile_width: i64,
        /// Requested tile height.
        tile_height: i64,
    },
    /// Source image has no pixels.
    #[error("source image is empty ({width}x{height})")]
    EmptySource {
        /// Source width.
        width: u32,
        /// Source height.
        height: u32,
    },
    /// Working or output buffer could not be shaped.
    #[error("buffer error: {0}")]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration validation.

    use super::*;

    #[test]
    fn config_rejects_zero_and_negative_sizes() {
        for (width, height) in [(0, 10), (10, 0), (-1, 10), (10, -5), (0, 0)] {
            assert_eq!(
                MosaicConfig::new(width, height),
                Err(MosaicError::InvalidConfiguration {
                    tile_width: width,
                    tile_height: height,
                })
            );
        }
    }

    #[test]
    fn config_saturates_oversized_tiles() {
        let config = MosaicConfig::new(i64::MAX, 7).expect("config should be valid");
        assert_eq!(config.tile_width(), u32::MAX);
        assert_eq!(config.tile_height(), 7);
    }

    #[test]
    fn default_config_uses_hundred_pixel_tiles() {
        let config = MosaicConfig::default();
        assert_eq!(config.tile_width(), 100);
        assert_eq!(config.tile_height(), 100);
    }
}
