#![warn(missing_docs)]
//! # block-mosaic-core
//!
//! ## Purpose
//! Defines the pixel data model shared across the `block-mosaic` workspace.
//!
//! ## Responsibilities
//! - Represent straight-alpha RGBA8 pixel buffers with a logical origin.
//! - Describe rectangular tiles and clip them to buffer bounds.
//! - Provide row-level copy and rectangle fill primitives used by the
//!   mosaic transformer.
//!
//! ## Data flow
//! Codec code produces a [`PixelBuffer`] -> the transformer reads it as the
//! source, writes a second [`PixelBuffer`] band by band -> codec code encodes
//! the result.
//!
//! ## Ownership and lifetimes
//! Buffers own their backing `Vec<u8>`. Row accessors hand out borrowed
//! slices that never outlive the buffer.
//!
//! ## Error model
//! Shape mismatches and dimension overflow return [`CoreError`]. Pixel
//! coordinates outside the buffer are caller bugs and panic through slice
//! indexing.
//!
//! ## Example
//! ```rust
//! use block_mosaic_core::{PixelBuffer, Rgba8, TileRect};
//!
//! let mut buffer = PixelBuffer::new(4, 2).unwrap();
//! buffer.fill_rect(TileRect::new(0, 0, 2, 2), Rgba8::new(10, 20, 30, 255));
//! assert_eq!(buffer.pixel(1, 1), Rgba8::new(10, 20, 30, 255));
//! assert_eq!(buffer.pixel(2, 0), Rgba8::TRANSPARENT);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bytes per pixel in the fixed RGBA8 layout.
pub const CHANNELS: usize = 4;

/// One straight-alpha RGBA8 pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, independent of the color channels.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black; the value of freshly allocated buffers.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Fully opaque black.
    pub const OPAQUE_BLACK: Self = Self::new(0, 0, 0, 255);

    /// Builds a pixel from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns channels in storage order.
    pub const fn to_array(self) -> [u8; CHANNELS] {
        [self.r, self.g, self.b, self.a]
    }

    /// Builds a pixel from channels in storage order.
    pub const fn from_array(channels: [u8; CHANNELS]) -> Self {
        Self::new(channels[0], channels[1], channels[2], channels[3])
    }
}

/// Rectangle in local pixel coordinates of one buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRect {
    /// Left column.
    pub x: u32,
    /// Top row.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl TileRect {
    /// Builds a rectangle.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Clips the rectangle to `[0, width) x [0, height)`.
    ///
    /// A rectangle starting outside the bounds clips to zero area.
    pub fn clip_to(self, width: u32, height: u32) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Self {
            x,
            y,
            width: self.width.min(width - x),
            height: self.height.min(height - y),
        }
    }

    /// Number of pixels covered.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Returns `true` when the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Logical top-left of a buffer in its source coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    /// Horizontal offset.
    pub x: i32,
    /// Vertical offset.
    pub y: i32,
}

/// Rectangular grid of straight-alpha RGBA8 pixels.
///
/// Rows are tightly packed (`width * 4` bytes each). Local coordinates always
/// start at `(0, 0)`; [`Origin`] only records where the grid sits in the
/// coordinate space it was cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    origin: Origin,
    rgba: Vec<u8>,
}

impl PixelBuffer {
    /// Allocates a transparent buffer.
    ///
    /// # Errors
    /// Returns [`CoreError::DimensionOverflow`] when `width * height * 4` does
    /// not fit in `usize`.
    pub fn new(width: u32, height: u32) -> Result<Self, CoreError> {
        let len = required_rgba_len(width, height)?;
        Ok(Self {
            width,
            height,
            origin: Origin::default(),
            rgba: vec![0; len],
        })
    }

    /// Wraps an existing RGBA byte vector.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidBufferShape`] when the byte count is not
    /// exactly `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, CoreError> {
        let expected = required_rgba_len(width, height)?;
        if rgba.len() != expected {
            return Err(CoreError::InvalidBufferShape {
                expected,
                actual: rgba.len(),
            });
        }

        Ok(Self {
            width,
            height,
            origin: Origin::default(),
            rgba,
        })
    }

    /// Allocates a buffer filled with one color.
    ///
    /// # Errors
    /// Same as [`PixelBuffer::new`].
    pub fn filled(width: u32, height: u32, color: Rgba8) -> Result<Self, CoreError> {
        let mut buffer = Self::new(width, height)?;
        for pixel in buffer.rgba.chunks_exact_mut(CHANNELS) {
            pixel.copy_from_slice(&color.to_array());
        }
        Ok(buffer)
    }

    /// Returns the buffer relocated to `origin`.
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Logical top-left in source coordinates.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Returns `true` when the buffer has zero area.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Full bounds in local coordinates.
    pub fn bounds(&self) -> TileRect {
        TileRect::new(0, 0, self.width, self.height)
    }

    /// Raw RGBA bytes in row-major order.
    pub fn as_rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Consumes the buffer and returns its bytes.
    pub fn into_rgba(self) -> Vec<u8> {
        self.rgba
    }

    /// Reads one pixel.
    ///
    /// # Panics
    /// Panics when `(x, y)` lies outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        let offset = self.pixel_offset(x, y);
        let mut channels = [0_u8; CHANNELS];
        channels.copy_from_slice(&self.rgba[offset..offset + CHANNELS]);
        Rgba8::from_array(channels)
    }

    /// Writes one pixel.
    ///
    /// # Panics
    /// Panics when `(x, y)` lies outside the buffer.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba8) {
        let offset = self.pixel_offset(x, y);
        self.rgba[offset..offset + CHANNELS].copy_from_slice(&color.to_array());
    }

    /// Borrows one row of pixel bytes.
    pub fn row(&self, y: u32) -> &[u8] {
        let start = self.row_offset(y);
        &self.rgba[start..start + self.row_len()]
    }

    /// Mutably borrows one row of pixel bytes.
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = self.row_offset(y);
        let len = self.row_len();
        &mut self.rgba[start..start + len]
    }

    /// Borrows `rows` consecutive rows starting at `y` as one slice.
    pub fn rows(&self, y: u32, rows: u32) -> &[u8] {
        let start = self.row_offset(y);
        &self.rgba[start..start + self.row_len() * rows as usize]
    }

    /// Copies `rows` full-width rows from `source` (starting at `source_y`)
    /// into this buffer (starting at `target_y`).
    ///
    /// # Panics
    /// Panics when widths differ or either row range is out of bounds.
    pub fn copy_rows_from(&mut self, source: &PixelBuffer, source_y: u32, target_y: u32, rows: u32) {
        assert_eq!(
            self.width, source.width,
            "row copy requires equal widths"
        );
        if rows == 0 {
            return;
        }
        let len = self.row_len() * rows as usize;
        let start = self.row_offset(target_y);
        self.rgba[start..start + len].copy_from_slice(source.rows(source_y, rows));
    }

    /// Overwrites every pixel inside `rect` (clipped to the buffer) with `color`.
    pub fn fill_rect(&mut self, rect: TileRect, color: Rgba8) {
        let rect = rect.clip_to(self.width, self.height);
        let channels = color.to_array();
        for y in rect.y..rect.y + rect.height {
            let row = self.row_mut(y);
            let start = rect.x as usize * CHANNELS;
            let end = start + rect.width as usize * CHANNELS;
            for pixel in row[start..end].chunks_exact_mut(CHANNELS) {
                pixel.copy_from_slice(&channels);
            }
        }
    }

    fn row_len(&self) -> usize {
        self.width as usize * CHANNELS
    }

    fn row_offset(&self, y: u32) -> usize {
        assert!(y <= self.height, "row {y} outside buffer of height {}", self.height);
        y as usize * self.row_len()
    }

    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} buffer",
            self.width,
            self.height
        );
        self.row_offset(y) + x as usize * CHANNELS
    }
}

/// Error type for pixel model validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Byte buffer length does not match declared geometry.
    #[error("invalid buffer shape: expected {expected} bytes, got {actual}")]
    InvalidBufferShape {
        /// Expected RGBA byte count.
        expected: usize,
        /// Actual RGBA byte count.
        actual: usize,
    },
    /// Declared geometry does not fit in addressable memory.
    #[error("buffer dimensions {width}x{height} overflow")]
    DimensionOverflow {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

/// Returns the byte length of a tightly packed `width x height` RGBA8 buffer.
///
/// # Errors
/// Returns [`CoreError::DimensionOverflow`] when the length overflows `usize`.
pub fn required_rgba_len(width: u32, height: u32) -> Result<usize, CoreError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(CHANNELS))
        .ok_or(CoreError::DimensionOverflow { width, height })
}
