//! Configuration service implementation.
//!
//! Loads [`AppConfig`] from `config.toml` (by default
//! `~/.config/intake/config.toml`) and caches it.

use crate::paths::IntakePaths;
use intake_core::config::AppConfig;
use intake_core::{IntakeError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the application configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the default config file location.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(IntakePaths::config_file()?))
    }

    /// Creates a service reading `path`.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// A missing file yields the defaults; a file that fails to parse is an
    /// error.
    pub fn get_config(&self) -> Result<AppConfig> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|e| IntakeError::internal(format!("Config cache poisoned: {}", e)))?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = Self::load_config(&self.path)?;

        {
            let mut write_lock = self
                .config
                .write()
                .map_err(|e| IntakeError::internal(format!("Config cache poisoned: {}", e)))?;
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    fn load_config(path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content).map_err(|e| {
            IntakeError::config(format!("Invalid config at {}: {}", path.display(), e))
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_core::config::RecoveryMode;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(dir.path().join("config.toml"));
        assert_eq!(service.get_config().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_loads_and_caches_until_invalidated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\nrecovery = \"per_record\"\n").unwrap();

        let service = ConfigService::with_path(path.clone());
        assert_eq!(
            service.get_config().unwrap().storage.recovery,
            RecoveryMode::PerRecord
        );

        std::fs::write(&path, "[images]\njpeg_quality = 60\n").unwrap();
        assert_eq!(service.get_config().unwrap().images.jpeg_quality, 80);

        service.invalidate_cache();
        let reloaded = service.get_config().unwrap();
        assert_eq!(reloaded.images.jpeg_quality, 60);
        assert_eq!(reloaded.storage.recovery, RecoveryMode::DiscardAll);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[images\nbroken").unwrap();

        let err = ConfigService::with_path(path).get_config().unwrap_err();
        assert!(matches!(err, IntakeError::Config(_)));
    }
}
