//! Unified path management for intake configuration and data files.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config/data directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for intake_core::IntakeError {
    fn from(e: PathError) -> Self {
        intake_core::IntakeError::config(e.to_string())
    }
}

/// Unified path management for intake.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/intake/            # Config directory
/// └── config.toml              # Application configuration
///
/// ~/.local/share/intake/       # Data directory
/// ├── storage.json             # Keyed local store (sessions live here)
/// └── reports/                 # Exported Markdown reports
/// ```
pub struct IntakePaths;

impl IntakePaths {
    const APP_DIR: &'static str = "intake";

    /// Returns the intake configuration directory (e.g. `~/.config/intake/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the intake data directory (e.g. `~/.local/share/intake/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Default location of the keyed local store.
    pub fn storage_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("storage.json"))
    }

    pub fn reports_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("reports"))
    }
}
