//! Configuration service implementation.
//!
//! Loads `config.toml` (by default `~/.config/userauths/config.toml`),
//! validates it, and caches the result.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use userauths_core::config::UserAuthsConfig;
use userauths_core::{Result, UserAuthsError};

use crate::paths::UserAuthsPaths;
use crate::storage::{AtomicFile, FileFormat};

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<UserAuthsConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the file at `path`.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service reading the platform default location.
    pub fn from_default_location() -> Result<Self> {
        Ok(Self::new(UserAuthsPaths::config_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// A missing file yields the defaults; an invalid one is an error.
    pub fn get_config(&self) -> Result<UserAuthsConfig> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|_| UserAuthsError::internal("config cache lock poisoned"))?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load()?;

        {
            let mut write_lock = self
                .config
                .write()
                .map_err(|_| UserAuthsError::internal("config cache lock poisoned"))?;
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

    /// Writes the defaults unless a file already exists.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: The file was created
    /// - `Ok(false)`: A file was already present and left alone
    pub fn write_defaults(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        self.file().replace(&UserAuthsConfig::default())?;
        self.invalidate_cache();
        tracing::info!("Wrote default configuration to {:?}", self.path);
        Ok(true)
    }

    fn load(&self) -> Result<UserAuthsConfig> {
        let config = match self.file().load()? {
            Some(config) => config,
            None => {
                tracing::debug!("No config at {:?}, using defaults", self.path);
                UserAuthsConfig::default()
            }
        };

        config
            .validate()
            .map_err(|e| UserAuthsError::config(format!("{:?}: {}", self.path, e)))?;
        Ok(config)
    }

    fn file(&self) -> AtomicFile<UserAuthsConfig> {
        AtomicFile::new(self.path.clone(), FileFormat::Toml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(temp_dir.path().join("config.toml"));

        assert_eq!(service.get_config().unwrap(), UserAuthsConfig::default());
    }

    #[test]
    fn test_reads_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[profile]
default_image = "static/anon.png"

[profile.public_id]
length = 12

[storage]
data_file = "/var/lib/userauths/store.json"
"#,
        )
        .unwrap();

        let config = ConfigService::new(path).get_config().unwrap();

        assert_eq!(config.profile.default_image, "static/anon.png");
        assert_eq!(config.profile.public_id.length, 12);
        assert_eq!(config.profile.public_id.alphabet, "abcdefghijk");
        assert_eq!(
            config.storage.data_file,
            Some(PathBuf::from("/var/lib/userauths/store.json"))
        );
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[profile.public_id]\nlength = 30\n").unwrap();

        let err = ConfigService::new(path).get_config().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_cache_until_invalidated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::new(path.clone());
        assert_eq!(service.get_config().unwrap().logging.level, "info");

        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(service.get_config().unwrap().logging.level, "info");

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().logging.level, "debug");
    }

    #[test]
    fn test_write_defaults_once() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(temp_dir.path().join("nested").join("config.toml"));

        assert!(service.write_defaults().unwrap());
        assert!(!service.write_defaults().unwrap());
        assert_eq!(service.get_config().unwrap(), UserAuthsConfig::default());
    }
}
