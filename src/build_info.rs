//! Build information
//!
//! `build.rs` stamps every compile with a number and a UTC timestamp; the
//! banner and `dietrec_status` report them so a client can tell which binary
//! it is talking to.

use serde::Serialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Identity of the running binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self::from_env(
            option_env!("DIETREC_BUILD_NUMBER"),
            option_env!("DIETREC_BUILD_TIMESTAMP"),
        )
    }

    /// Build 0 and "unknown" when compiled without the build script
    fn from_env(number: Option<&str>, timestamp: Option<&'static str>) -> Self {
        Self {
            version: VERSION,
            build_number: number.and_then(|n| n.trim().parse().ok()).unwrap_or(0),
            build_timestamp: timestamp.unwrap_or("unknown"),
        }
    }

    pub fn banner(&self) -> String {
        let rule = "=".repeat(47);
        format!(
            "{rule}\n  Diet Recommendation System (dietrec)\n  Version: {} | Build: {}\n  Compiled: {}\n{rule}",
            self.version, self.build_number, self.build_timestamp
        )
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    eprintln!("{}", BuildInfo::current().banner());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_values() {
        let info = BuildInfo::from_env(Some("42"), Some("2025-06-01T08:00:00Z"));
        assert_eq!(info.build_number, 42);
        assert_eq!(info.build_timestamp, "2025-06-01T08:00:00Z");
        assert_eq!(info.version, VERSION);
    }

    #[test]
    fn test_from_env_without_build_script() {
        let info = BuildInfo::from_env(None, None);
        assert_eq!(info.build_number, 0);
        assert_eq!(info.build_timestamp, "unknown");

        assert_eq!(BuildInfo::from_env(Some("4a"), None).build_number, 0);
    }

    #[test]
    fn test_banner_names_build() {
        let banner = BuildInfo::from_env(Some("7"), Some("2025-06-01T08:00:00Z")).banner();
        assert!(banner.contains("Diet Recommendation System (dietrec)"));
        assert!(banner.contains("Build: 7"));
        assert!(banner.contains("Compiled: 2025-06-01T08:00:00Z"));
        assert_eq!(banner.lines().count(), 5);
    }
}
