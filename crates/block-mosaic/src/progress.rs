//! Progress observers invoked once per completed band.

/// Snapshot emitted after one band has been written to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandProgress {
    /// Zero-based band index.
    pub band_index: u32,
    /// Total bands in this run.
    pub total_bands: u32,
    /// First source row of the band.
    pub offset: u32,
    /// Rows written for this band.
    pub rows: u32,
    /// Offset the driver advanced to; at or past the height after the last band.
    pub next_offset: u32,
    /// Tiles averaged in this band.
    pub tiles: u32,
}

impl BandProgress {
    /// Returns `true` for the final band of a run.
    pub fn is_last(&self) -> bool {
        self.band_index + 1 == self.total_bands
    }
}

/// Receives band completion events.
pub trait ProgressObserver {
    /// Called after a band has been averaged and written.
    fn on_band_complete(&mut self, progress: &BandProgress);
}

impl<F> ProgressObserver for F
where
    F: FnMut(&BandProgress),
{
    fn on_band_complete(&mut self, progress: &BandProgress) {
        self(progress);
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_band_complete(&mut self, _progress: &BandProgress) {}
}

/// Observer that records every event in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressLog {
    /// Events received so far.
    pub events: Vec<BandProgress>,
}

impl ProgressLog {
    /// Offsets reported after each band, in order.
    pub fn next_offsets(&self) -> Vec<u32> {
        self.events.iter().map(|event| event.next_offset).collect()
    }
}

impl ProgressObserver for ProgressLog {
    fn on_band_complete(&mut self, progress: &BandProgress) {
        self.events.push(*progress);
    }
}

/// Observer that emits one `tracing` event per band.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressObserver for TracingProgress {
    fn on_band_complete(&mut self, progress: &BandProgress) {
        tracing::info!(
            stage = "band",
            action = "complete",
            band = progress.band_index + 1,
            total = progress.total_bands,
            offset = progress.next_offset,
            tiles = progress.tiles,
        );
    }
}
