//! Run settings for the command-line driver.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use block_mosaic::DEFAULT_TILE_SIZE;

use crate::AppError;

/// Environment variable that overrides the default tile size.
pub const TILE_SIZE_ENV: &str = "BLOCK_MOSAIC_TILE_SIZE";

/// Input path used when none is given.
pub const DEFAULT_INPUT: &str = "test.jpg";

/// Output path used when none is given.
pub const DEFAULT_OUTPUT: &str = "result.jpg";

/// JPEG quality used when none is given.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Requested tile geometry, unvalidated.
///
/// Values are kept signed so that zero and negative requests reach
/// [`block_mosaic::MosaicConfig::new`] and fail there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSize {
    /// Tile width in pixels.
    pub width: i64,
    /// Tile height in pixels.
    pub height: i64,
}

impl TileSize {
    /// Square tile of `side` pixels.
    pub const fn square(side: i64) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

impl Default for TileSize {
    fn default() -> Self {
        Self::square(i64::from(DEFAULT_TILE_SIZE))
    }
}

impl fmt::Display for TileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parses `N` (square) or `WxH`.
impl FromStr for TileSize {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidTileSize(raw.to_string());
        let normalized = raw.trim().to_ascii_lowercase();

        match normalized.split_once('x') {
            Some((width, height)) => Ok(Self {
                width: width.trim().parse().map_err(|_| invalid())?,
                height: height.trim().parse().map_err(|_| invalid())?,
            }),
            None => normalized.parse().map(Self::square).map_err(|_| invalid()),
        }
    }
}

/// Reads the tile size override from [`TILE_SIZE_ENV`].
///
/// Semantics:
/// - Unset or blank => `Ok(None)`.
/// - `N` or `WxH` => `Ok(Some(..))`.
///
/// # Errors
/// Returns [`AppError::InvalidTileSize`] when the value cannot be parsed.
pub fn tile_size_from_env() -> Result<Option<TileSize>, AppError> {
    match std::env::var(TILE_SIZE_ENV) {
        Ok(value) if !value.trim().is_empty() => value.parse().map(Some),
        _ => Ok(None),
    }
}

/// Everything one command-line run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    /// Image to read.
    pub input: PathBuf,
    /// Image to write; the extension selects the format.
    pub output: PathBuf,
    /// Tile geometry.
    pub tile: TileSize,
    /// JPEG quality in `1..=100`.
    pub jpeg_quality: u8,
    /// Optional path for a JSON run report.
    pub report: Option<PathBuf>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            tile: TileSize::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            report: None,
        }
    }
}
