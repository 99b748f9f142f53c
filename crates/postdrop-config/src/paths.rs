//! Application paths management.

use directories::ProjectDirs;
use std::path::PathBuf;

/// Manages application paths following platform conventions.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
}

impl AppPaths {
    /// Create paths using platform-specific directories.
    ///
    /// Returns `None` when no home directory can be resolved, which is the
    /// normal case inside a function runtime.
    pub fn new() -> Option<Self> {
        let proj_dirs = ProjectDirs::from("com", "postdrop", "postdrop")?;
        let config_dir = proj_dirs.config_dir().to_path_buf();

        Some(Self {
            config_file: config_dir.join("config.toml"),
            config_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_paths_layout() {
        // Headless CI runners may not have a home directory.
        if let Some(paths) = AppPaths::new() {
            assert!(paths.config_file.ends_with("config.toml"));
            assert!(paths.config_file.starts_with(&paths.config_dir));
        }
    }
}
