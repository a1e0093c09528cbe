//! Runtime configuration
//!
//! Everything is read from the environment; there is no config file.

use std::path::{Path, PathBuf};

/// Overrides the database location
pub const DATABASE_PATH_ENV: &str = "DIETREC_DATABASE_PATH";

/// Filter directive applied on top of `RUST_LOG`
pub const DEFAULT_LOG_DIRECTIVE: &str = "dietrec=info";

/// Get the database path from environment or use default
pub fn get_database_path() -> PathBuf {
    std::env::var(DATABASE_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let exe_dir = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));
            default_database_path(&exe_dir)
        })
}

/// `<project root>/data/dietrec.db`, stepping out of target/release or target/debug
fn default_database_path(exe_dir: &Path) -> PathBuf {
    let mut path = exe_dir.to_path_buf();

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(Path::parent) {
            path = grandparent.to_path_buf();
        }
    }

    path.push("data");
    path.push("dietrec.db");
    path
}
