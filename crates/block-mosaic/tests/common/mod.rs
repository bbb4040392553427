//! Shared fixtures for mosaic integration tests.

use block_mosaic_core::{PixelBuffer, Rgba8};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a seeded RGBA noise image.
#[allow(dead_code)]
pub fn noise_image(width: u32, height: u32, seed: u64) -> PixelBuffer {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rgba = vec![0_u8; width as usize * height as usize * 4];
    rng.fill(&mut rgba[..]);
    PixelBuffer::from_rgba(width, height, rgba).expect("noise fixture should be valid")
}

/// Creates an opaque image whose red channel encodes the column and green
/// channel encodes the row.
#[allow(dead_code)]
pub fn coordinate_image(width: u32, height: u32) -> PixelBuffer {
    let mut image = PixelBuffer::new(width, height).expect("fixture should allocate");
    for y in 0..height {
        for x in 0..width {
            image.set_pixel(x, y, Rgba8::new(x as u8, y as u8, 0, 255));
        }
    }
    image
}

/// Asserts that every pixel of the `x0..x1, y0..y1` block equals its top-left pixel.
#[allow(dead_code)]
pub fn assert_flat(image: &PixelBuffer, x0: u32, y0: u32, x1: u32, y1: u32) {
    let expected = image.pixel(x0, y0);
    for y in y0..y1 {
        for x in x0..x1 {
            assert_eq!(
                image.pixel(x, y),
                expected,
                "pixel ({x}, {y}) differs inside tile starting at ({x0}, {y0})"
            );
        }
    }
}
