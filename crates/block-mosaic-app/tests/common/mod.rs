//! Shared fixtures for app integration tests.

use std::path::{Path, PathBuf};

use block_mosaic::NoProgress;
use block_mosaic_app::{AppError, RunReport, RunSettings, TileSize};
use image::{Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Writes a seeded RGBA noise PNG and returns its path.
#[allow(dead_code)]
pub fn write_noise_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let mut rng = StdRng::seed_from_u64((u64::from(width) << 32) | u64::from(height));
    let image = RgbaImage::from_fn(width, height, |_, _| Rgba(rng.random::<[u8; 4]>()));
    let path = dir.join(name);
    image.save(&path).expect("fixture png should be written");
    path
}

/// Builds settings that read `input` and write `output` with square tiles.
#[allow(dead_code)]
pub fn settings(input: PathBuf, output: PathBuf, tile: i64) -> RunSettings {
    RunSettings {
        input,
        output,
        tile: TileSize::square(tile),
        ..RunSettings::default()
    }
}

/// Runs the pipeline without progress output.
#[allow(dead_code)]
pub fn run_quiet(settings: &RunSettings) -> Result<RunReport, AppError> {
    block_mosaic_app::run(settings, &mut NoProgress)
}
