//! CLI command implementations.

pub mod config;
pub mod init;
pub mod invoke;

use anyhow::{Context, Result};
use postdrop_config::Config;
use std::path::PathBuf;

/// Config file the CLI reads and writes: `POSTDROP_CONFIG` or the platform default.
pub fn config_path() -> Result<PathBuf> {
    Config::resolve_path().context("Failed to determine config file location")
}

/// Format a byte count in human-readable form.
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
