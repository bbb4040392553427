//! Band driver: walks the source one tile-height at a time.

use block_mosaic_core::PixelBuffer;

use crate::average::average_tiles;
use crate::band::WorkingBand;
use crate::progress::{BandProgress, ProgressObserver};
use crate::{MosaicConfig, MosaicError};

/// One mosaic run over a borrowed source image.
///
/// Each [`step`](Self::step) loads, averages and writes exactly one band, so
/// a caller can stop between bands. The output is only reachable through
/// [`finish`](Self::finish), which completes any remaining bands first.
pub struct MosaicTransformer<'a> {
    source: &'a PixelBuffer,
    config: MosaicConfig,
    band: WorkingBand,
    output: PixelBuffer,
    offset: u32,
    band_index: u32,
    total_bands: u32,
}

impl<'a> MosaicTransformer<'a> {
    /// Prepares a run, allocating the working band and the output.
    ///
    /// The band is `source.width()` wide and `tile_height` tall, capped at
    /// the source height.
    ///
    /// # Errors
    /// Returns [`MosaicError::EmptySource`] when the source has zero area.
    pub fn new(source: &'a PixelBuffer, config: MosaicConfig) -> Result<Self, MosaicError> {
        if source.is_empty() {
            return Err(MosaicError::EmptySource {
                width: source.width(),
                height: source.height(),
            });
        }

        let band_rows = config.tile_height().min(source.height());
        let band = WorkingBand::new(source.width(), band_rows)?;
        let output = PixelBuffer::new(source.width(), source.height())?.with_origin(source.origin());
        let total_bands = source.height().div_ceil(config.tile_height());

        tracing::debug!(
            stage = "transform",
            action = "start",
            width = source.width(),
            height = source.height(),
            tile_width = config.tile_width(),
            tile_height = config.tile_height(),
            total_bands,
        );

        Ok(Self {
            source,
            config,
            band,
            output,
            offset: 0,
            band_index: 0,
            total_bands,
        })
    }

    /// Configuration of this run.
    pub fn config(&self) -> MosaicConfig {
        self.config
    }

    /// Bands this run processes in total.
    pub fn total_bands(&self) -> u32 {
        self.total_bands
    }

    /// Current vertical offset into the source.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Returns `true` once every band has been written.
    pub fn is_complete(&self) -> bool {
        self.offset >= self.source.height()
    }

    /// Processes the next band and reports it to `observer`.
    ///
    /// Returns `None` once the run is complete.
    pub fn step(&mut self, observer: &mut dyn ProgressObserver) -> Option<BandProgress> {
        if self.is_complete() {
            return None;
        }

        let offset = self.offset;
        self.band.load(self.source, offset);
        let region = self.band.valid_region();
        let tiles = average_tiles(
            self.band.buffer_mut(),
            region,
            self.config.tile_width(),
            self.config.tile_height(),
        );
        let rows = self.band.write_to(&mut self.output, offset);

        self.offset = offset.saturating_add(self.config.tile_height());
        let progress = BandProgress {
            band_index: self.band_index,
            total_bands: self.total_bands,
            offset,
            rows,
            next_offset: self.offset,
            tiles,
        };
        self.band_index += 1;

        observer.on_band_complete(&progress);
        Some(progress)
    }

    /// Processes all remaining bands and returns the complete output.
    pub fn finish(mut self, observer: &mut dyn ProgressObserver) -> PixelBuffer {
        while self.step(observer).is_some() {}

        tracing::debug!(
            stage = "transform",
            action = "complete",
            bands = self.band_index,
        );
        self.output
    }
}
