//! Working band buffer plus the band loader and band writer.
//!
//! The band is allocated once per run and overwritten on every iteration.
//! Rows past `valid_rows` hold stale pixels from an earlier band; nothing
//! outside [`WorkingBand::valid_region`] may be read.

use block_mosaic_core::{CoreError, PixelBuffer, TileRect};

pub(crate) struct WorkingBand {
    buffer: PixelBuffer,
    valid_rows: u32,
}

impl WorkingBand {
    /// Allocates a `width x rows` scratch band with no valid rows.
    pub(crate) fn new(width: u32, rows: u32) -> Result<Self, CoreError> {
        Ok(Self {
            buffer: PixelBuffer::new(width, rows)?,
            valid_rows: 0,
        })
    }

    /// Copies source rows `offset..` into the band, as many as fit.
    ///
    /// Returns the number of rows loaded.
    pub(crate) fn load(&mut self, source: &PixelBuffer, offset: u32) -> u32 {
        debug_assert!(offset < source.height(), "band offset past source height");
        let rows = self.buffer.height().min(source.height() - offset);
        self.buffer.copy_rows_from(source, offset, 0, rows);
        self.valid_rows = rows;
        rows
    }

    /// Region holding pixels from the most recent load.
    pub(crate) fn valid_region(&self) -> TileRect {
        TileRect::new(0, 0, self.buffer.width(), self.valid_rows)
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    /// Copies the valid rows into `output` starting at row `offset`.
    ///
    /// Never writes past the output height. Returns the rows written.
    pub(crate) fn write_to(&self, output: &mut PixelBuffer, offset: u32) -> u32 {
        let rows = self
            .valid_rows
            .min(output.height().saturating_sub(offset));
        output.copy_rows_from(&self.buffer, 0, offset, rows);
        rows
    }
}

#[cfg(test)]
mod tests {
    use block_mosaic_core::Rgba8;

    use super::*;

    fn striped(width: u32, height: u32) -> PixelBuffer {
        let mut source = PixelBuffer::new(width, height).expect("buffer should allocate");
        for y in 0..height {
            for x in 0..width {
                source.set_pixel(x, y, Rgba8::new(y as u8, 0, 0, 255));
            }
        }
        source
    }

    #[test]
    fn load_clips_last_partial_band() {
        let source = striped(3, 5);
        let mut band = WorkingBand::new(3, 2).expect("band should allocate");

        assert_eq!(band.load(&source, 0), 2);
        assert_eq!(band.load(&source, 4), 1);
        assert_eq!(band.valid_region(), TileRect::new(0, 0, 3, 1));

        // Row 1 is stale from the first load and stays untouched.
        assert_eq!(band.buffer.pixel(0, 0).r, 4);
        assert_eq!(band.buffer.pixel(0, 1).r, 1);
    }

    #[test]
    fn write_copies_only_valid_rows() {
        let source = striped(2, 3);
        let mut band = WorkingBand::new(2, 2).expect("band should allocate");
        let mut output = PixelBuffer::new(2, 3).expect("buffer should allocate");

        band.load(&source, 0);
        assert_eq!(band.write_to(&mut output, 0), 2);
        band.load(&source, 2);
        assert_eq!(band.write_to(&mut output, 2), 1);

        assert_eq!(output, source);
    }
}
