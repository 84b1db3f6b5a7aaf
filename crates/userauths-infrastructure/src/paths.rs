//! Platform path resolution for userauths files.
//!
//! ```text
//! ~/.config/userauths/          # Config directory
//! └── config.toml               # Application configuration
//!
//! ~/.local/share/userauths/     # Data directory
//! └── store.json                # Accounts and profiles
//! ```

use std::path::PathBuf;

use userauths_core::config::UserAuthsConfig;
use userauths_core::{Result, UserAuthsError};

const APP_DIR: &str = "userauths";
const CONFIG_FILE: &str = "config.toml";
const STORE_FILE: &str = "store.json";

pub struct UserAuthsPaths;

impl UserAuthsPaths {
    /// Returns the userauths configuration directory (e.g. `~/.config/userauths/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| UserAuthsError::config("Cannot find config directory"))
    }

    /// Returns the userauths data directory (e.g. `~/.local/share/userauths/`).
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| UserAuthsError::config("Cannot find data directory"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// The store file: the configured override, else the platform default.
    pub fn store_file(config: &UserAuthsConfig) -> Result<PathBuf> {
        match &config.storage.data_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join(STORE_FILE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_store_file_wins() {
        let mut config = UserAuthsConfig::default();
        config.storage.data_file = Some(PathBuf::from("/tmp/custom.json"));

        assert_eq!(
            UserAuthsPaths::store_file(&config).unwrap(),
            PathBuf::from("/tmp/custom.json")
        );
    }

    #[test]
    fn test_config_file_name() {
        if let Ok(path) = UserAuthsPaths::config_file() {
            assert!(path.ends_with("userauths/config.toml"));
        }
    }
}
