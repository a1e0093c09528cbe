//! Build script for dietrec
//!
//! Increments build number on each recompilation and embeds build metadata.

use std::fs;
use std::path::Path;

fn main() {
    // Only rerun when src/ files change
    println!("cargo:rerun-if-changed=src");

    // Counter persisted next to Cargo.toml
    let build_number_path = Path::new("build_number.txt");

    // Missing or unreadable file starts the count at 0
    let current_build: u64 = fs::read_to_string(build_number_path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);
    let new_build = current_build + 1;

    // Persist the new number for the next build
    fs::write(build_number_path, new_build.to_string())
        .expect("Failed to write build number file");

    // UTC compile time, ISO 8601
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    // Read back through option_env! in build_info.rs
    println!("cargo:rustc-env=DIETREC_BUILD_NUMBER={}", new_build);
    println!("cargo:rustc-env=DIETREC_BUILD_TIMESTAMP={}", timestamp);
}
