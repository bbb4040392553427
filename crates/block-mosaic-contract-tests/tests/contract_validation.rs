//! Validates run report output against the frozen JSON schema.

use std::time::Duration;

use block_mosaic::{MosaicConfig, transform};
use block_mosaic_app::{RunReport, RunSettings};
use block_mosaic_core::PixelBuffer;
use jsonschema::JSONSchema;
use serde_json::Value;

const SCHEMA_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../contracts/run-report.schema.json"
);

fn load_json(path: &str) -> Value {
    let raw = std::fs::read_to_string(path).expect("json file should be readable");
    serde_json::from_str(&raw).expect("json file should be valid")
}

fn compile_validator() -> JSONSchema {
    let schema = load_json(SCHEMA_PATH);
    JSONSchema::compile(&schema).expect("schema should compile")
}

#[test]
fn run_report_fixture_matches_schema() {
    let fixture = load_json(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/fixtures/run-report.valid.json"
    ));
    assert!(
        compile_validator().is_valid(&fixture),
        "valid fixture should validate against schema"
    );
}

#[test]
fn run_report_invalid_fixture_is_rejected() {
    let fixture = load_json(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../contracts/fixtures/run-report.invalid.json"
    ));
    assert!(
        !compile_validator().is_valid(&fixture),
        "zero tile width and malformed digest must fail validation"
    );
}

#[test]
fn generated_run_report_matches_schema() {
    let source = PixelBuffer::new(150, 150).expect("source should allocate");
    let output = transform(&source, 100, 100).expect("transform should succeed");
    let report = RunReport::new(
        &RunSettings::default(),
        MosaicConfig::default(),
        &output,
        2,
        Duration::from_millis(3),
    );

    let encoded = report.to_json_bytes().expect("report should encode");
    let value: Value = serde_json::from_slice(&encoded).expect("report should be json");
    assert!(
        compile_validator().is_valid(&value),
        "generated report should validate against schema"
    );
}
