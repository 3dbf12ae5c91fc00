//! Unified path management for termfolio files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/termfolio/        # Config directory (platform equivalent elsewhere)
//! ├── config.toml             # Optional configuration
//! ├── storage.toml            # Persisted visitor state
//! └── logs/                   # Shell logs
//!     └── termfolio.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;
use thiserror::Error;

const APP_DIR: &str = "termfolio";

#[derive(Debug, Error)]
pub enum PathError {
    #[error("Cannot find the platform config directory")]
    ConfigDirNotFound,
}

pub struct FolioPaths;

impl FolioPaths {
    /// Returns the termfolio configuration directory.
    ///
    /// `TERMFOLIO_HOME` overrides the platform default.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        if let Some(home) = std::env::var_os("TERMFOLIO_HOME") {
            return Ok(PathBuf::from(home));
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn storage_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("storage.toml"))
    }

    pub fn log_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("logs"))
    }
}
