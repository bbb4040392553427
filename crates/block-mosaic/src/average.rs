//! Tile averaging over the working band.
//!
//! Channels are widened to the 16-bit scale (`v * 257`) before summing and
//! narrowed with a truncating divide and `>> 8`. Alpha is averaged like any
//! other channel; nothing is premultiplied.

use block_mosaic_core::{CHANNELS, PixelBuffer, Rgba8, TileRect};

#[derive(Debug, Default)]
struct ChannelSums {
    r: u64,
    g: u64,
    b: u64,
    a: u64,
    count: u64,
}

impl ChannelSums {
    fn add(&mut self, pixel: &[u8]) {
        self.r += widen(pixel[0]);
        self.g += widen(pixel[1]);
        self.b += widen(pixel[2]);
        self.a += widen(pixel[3]);
        self.count += 1;
    }

    fn mean(&self) -> Rgba8 {
        if self.count == 0 {
            return Rgba8::OPAQUE_BLACK;
        }
        Rgba8::new(
            narrow(self.r / self.count),
            narrow(self.g / self.count),
            narrow(self.b / self.count),
            narrow(self.a / self.count),
        )
    }
}

#[inline]
fn widen(channel: u8) -> u64 {
    u64::from(channel) * 0x101
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
fn narrow(wide: u64) -> u8 {
    // A mean of widened values never exceeds 0xFFFF.
    (wide >> 8) as u8
}

/// Average color of the pixels inside `rect`, clipped to `buffer`.
///
/// An empty rectangle averages to opaque black.
pub fn average_color(buffer: &PixelBuffer, rect: TileRect) -> Rgba8 {
    let rect = rect.clip_to(buffer.width(), buffer.height());
    let mut sums = ChannelSums::default();
    let start = rect.x as usize * CHANNELS;
    let end = start + rect.width as usize * CHANNELS;

    for y in rect.y..rect.y + rect.height {
        for pixel in buffer.row(y)[start..end].chunks_exact(CHANNELS) {
            sums.add(pixel);
        }
    }

    sums.mean()
}

/// Flattens every tile of `region` to its average color.
///
/// Tiles on the right and bottom edges are clipped to `region`. Returns the
/// number of tiles written.
pub(crate) fn average_tiles(
    band: &mut PixelBuffer,
    region: TileRect,
    tile_width: u32,
    tile_height: u32,
) -> u32 {
    let mut tiles = 0;
    for y in (0..region.height).step_by(tile_height as usize) {
        for x in (0..region.width).step_by(tile_width as usize) {
            let cell = TileRect::new(x, y, tile_width, tile_height)
                .clip_to(region.width, region.height);
            let color = average_color(band, cell);
            band.fill_rect(cell, color);
            tiles += 1;
        }
    }
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker_2x2() -> PixelBuffer {
        let mut buffer = PixelBuffer::new(2, 2).expect("buffer should allocate");
        buffer.set_pixel(0, 0, Rgba8::new(0, 0, 0, 255));
        buffer.set_pixel(1, 0, Rgba8::new(255, 255, 255, 255));
        buffer.set_pixel(0, 1, Rgba8::new(0, 0, 0, 255));
        buffer.set_pixel(1, 1, Rgba8::new(255, 255, 255, 255));
        buffer
    }

    #[test]
    fn black_and_white_average_truncates_to_127() {
        let buffer = checker_2x2();
        assert_eq!(
            average_color(&buffer, buffer.bounds()),
            Rgba8::new(127, 127, 127, 255)
        );
    }

    #[test]
    fn alpha_is_averaged_without_premultiplying() {
        let mut buffer = PixelBuffer::new(2, 1).expect("buffer should allocate");
        buffer.set_pixel(0, 0, Rgba8::new(200, 100, 50, 0));
        buffer.set_pixel(1, 0, Rgba8::new(200, 100, 50, 255));

        assert_eq!(
            average_color(&buffer, buffer.bounds()),
            Rgba8::new(200, 100, 50, 127)
        );
    }

    #[test]
    fn flat_region_averages_to_itself() {
        for value in [0_u8, 1, 127, 128, 254, 255] {
            let color = Rgba8::new(value, 255 - value, value / 2, value);
            let buffer = PixelBuffer::filled(3, 3, color).expect("buffer should allocate");
            assert_eq!(average_color(&buffer, buffer.bounds()), color);
        }
    }

    #[test]
    fn empty_rect_defaults_to_opaque_black() {
        let buffer = checker_2x2();
        assert_eq!(
            average_color(&buffer, TileRect::new(5, 5, 1, 1)),
            Rgba8::OPAQUE_BLACK
        );
    }

    #[test]
    fn average_tiles_clips_and_counts_edge_tiles() {
        let mut band = PixelBuffer::filled(5, 3, Rgba8::new(9, 9, 9, 255))
            .expect("buffer should allocate");
        band.set_pixel(4, 0, Rgba8::new(255, 9, 9, 255));

        // Only the first two rows are valid; row 2 must stay untouched.
        band.set_pixel(4, 2, Rgba8::new(1, 2, 3, 4));
        let tiles = average_tiles(&mut band, TileRect::new(0, 0, 5, 2), 2, 2);

        assert_eq!(tiles, 3);
        assert_eq!(band.pixel(4, 1), Rgba8::new(132, 9, 9, 255));
        assert_eq!(band.pixel(4, 2), Rgba8::new(1, 2, 3, 4));
    }
}
