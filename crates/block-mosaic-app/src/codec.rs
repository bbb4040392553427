//! Image codec collaborator backed by the `image` crate.
//!
//! Decoding accepts any enabled format and converts to straight-alpha RGBA8.
//! Encoding picks the format from the output extension: JPEG drops alpha and
//! honors a quality setting, PNG keeps all four channels.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use block_mosaic_core::PixelBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::AppError;

/// Output formats the encoder can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Baseline JPEG, alpha discarded.
    Jpeg,
    /// Lossless PNG with alpha.
    Png,
}

impl OutputFormat {
    /// Chooses a format from the file extension.
    ///
    /// # Errors
    /// Returns [`AppError::UnsupportedFormat`] for anything but JPEG or PNG.
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        match ImageFormat::from_path(path) {
            Ok(ImageFormat::Jpeg) => Ok(Self::Jpeg),
            Ok(ImageFormat::Png) => Ok(Self::Png),
            _ => Err(AppError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Decodes an image file into an RGBA8 pixel buffer.
///
/// # Errors
/// Returns [`AppError::Decode`] when the file cannot be read or decoded.
pub fn decode_file(path: &Path) -> Result<PixelBuffer, AppError> {
    let decoded = image::open(path).map_err(|source| AppError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    to_pixel_buffer(decoded)
}

/// Converts any decoded image into a straight-alpha RGBA8 buffer.
///
/// # Errors
/// Returns [`AppError::Core`] if the converted bytes do not match the
/// reported geometry.
pub fn to_pixel_buffer(image: DynamicImage) -> Result<PixelBuffer, AppError> {
    let rgba = image.into_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::from_rgba(width, height, rgba.into_raw()).map_err(AppError::Core)
}

/// Copies a pixel buffer into an `image` RGBA image without reinterpreting it.
///
/// # Errors
/// Returns [`AppError::ImageShape`] if `image` rejects the geometry.
pub fn to_rgba_image(buffer: &PixelBuffer) -> Result<RgbaImage, AppError> {
    RgbaImage::from_raw(buffer.width(), buffer.height(), buffer.as_rgba().to_vec()).ok_or(
        AppError::ImageShape {
            width: buffer.width(),
            height: buffer.height(),
        },
    )
}

/// Encodes `buffer` to `path` in the format implied by its extension.
///
/// `jpeg_quality` is used only for JPEG output.
///
/// # Errors
/// Returns [`AppError::UnsupportedFormat`] for unknown extensions,
/// [`AppError::Io`] when the file cannot be written and [`AppError::Encode`]
/// when the encoder fails.
pub fn encode_file(buffer: &PixelBuffer, path: &Path, jpeg_quality: u8) -> Result<(), AppError> {
    let format = OutputFormat::from_path(path)?;
    let image = DynamicImage::ImageRgba8(to_rgba_image(buffer)?);

    let file = File::create(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    let encoded = match format {
        OutputFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut writer, jpeg_quality);
            DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(encoder)
        }
        OutputFormat::Png => image.write_with_encoder(PngEncoder::new(&mut writer)),
    };
    encoded.map_err(|source| AppError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    writer.flush().map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}
