//! Path management for tally
//!
//! ## Path Resolution Order
//!
//! 1. `TALLY_CLI_CONFIG_DIR` environment variable (if set)
//! 2. The platform config directory for the `tally` project
//!    (`~/.config/tally` on Linux, `~/Library/Application Support/tally` on
//!    macOS, `%APPDATA%\tally\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::TallyError;

/// Environment variable that overrides the config directory
pub const CONFIG_DIR_ENV: &str = "TALLY_CLI_CONFIG_DIR";

/// Manages all paths used by tally
#[derive(Debug, Clone)]
pub struct TallyPaths {
    base_dir: PathBuf,
}

impl TallyPaths {
    /// Resolve the config directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and no
    /// override is set.
    pub fn new() -> Result<Self, TallyError> {
        let base_dir = if let Ok(custom) = std::env::var(CONFIG_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "tally")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    TallyError::Config("Could not determine a home directory".into())
                })?
        };

        Ok(Self { base_dir })
    }

    /// Create TallyPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Log file used while the TUI owns the terminal
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("tally.log")
    }

    /// Ensure the config directory exists
    pub fn ensure_directories(&self) -> Result<(), TallyError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| TallyError::Io(format!("Failed to create config directory: {}", e)))
    }
}
