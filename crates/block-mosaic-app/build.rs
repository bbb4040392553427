use std::fs;
use std::path::PathBuf;

fn main() {
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let version_path = manifest_dir
        .ancestors()
        .map(|dir| dir.join("VERSION"))
        .find(|candidate| candidate.is_file())
        .expect("VERSION file in workspace root");

    println!("cargo:rerun-if-changed={}", version_path.display());

    let raw = fs::read_to_string(&version_path).expect("read VERSION file");
    let version = raw.trim();
    let well_formed = version.split('.').count() == 3
        && version
            .split('.')
            .all(|part| !part.is_empty() && part.bytes().all(|byte| byte.is_ascii_digit()));
    assert!(
        well_formed,
        "VERSION must be MAJOR.MINOR.PATCH, found {version:?}"
    );

    println!("cargo:rustc-env=BLOCK_MOSAIC_VERSION={version}");
}
