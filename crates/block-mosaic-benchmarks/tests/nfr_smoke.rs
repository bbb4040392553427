//! Benchmark smoke test for the band-streamed mosaic transform.

use std::time::Instant;

use block_mosaic::transform;
use block_mosaic_core::PixelBuffer;

#[test]
fn benchmark_transform_smoke_prints_latency() {
    let rgba: Vec<u8> = (0..1_280 * 720 * 4).map(|index| (index % 251) as u8).collect();
    let source = PixelBuffer::from_rgba(1_280, 720, rgba).expect("source should be valid");

    let start = Instant::now();
    let mut checksum = 0_u64;

    for tile in [4_i64, 16, 100] {
        let output = transform(&source, tile, tile).expect("transform should succeed");
        checksum += output.as_rgba().iter().map(|byte| u64::from(*byte)).sum::<u64>();
    }

    let elapsed_ms = start.elapsed().as_millis();
    println!("benchmark_transform_elapsed_ms={elapsed_ms}");
    println!("benchmark_transform_checksum={checksum}");

    // This is a lightweight guardrail; strict NFR checks are environment-specific.
    assert!(
        elapsed_ms < 20_000,
        "transform smoke benchmark should stay bounded"
    );
}
