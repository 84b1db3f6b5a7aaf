//! Wiring: configuration, logging and the file-backed service.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use userauths_application::AccountService;
use userauths_core::config::UserAuthsConfig;
use userauths_infrastructure::{
    ConfigService, FileUserStore, RandomPublicIdGenerator, UserAuthsPaths,
};

pub fn config_service(path: Option<PathBuf>) -> Result<ConfigService> {
    match path {
        Some(path) => Ok(ConfigService::new(path)),
        None => ConfigService::from_default_location().context("Failed to locate config file"),
    }
}

/// Logs to stderr. `RUST_LOG` wins over `logging.level` when set.
pub fn init_tracing(config: &UserAuthsConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.logging.level)
            .with_context(|| format!("Invalid logging.level '{}'", config.logging.level))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

pub fn account_service(
    config: &UserAuthsConfig,
    data_file: Option<PathBuf>,
) -> Result<AccountService> {
    let path = match data_file {
        Some(path) => path,
        None => UserAuthsPaths::store_file(config)?,
    };
    tracing::debug!("Using store file {}", path.display());

    let generator = Arc::new(RandomPublicIdGenerator::new(&config.profile.public_id)?);
    let store = Arc::new(
        FileUserStore::open(path.clone(), generator)
            .with_context(|| format!("Failed to open store {}", path.display()))?,
    );

    Ok(AccountService::new(
        store.clone(),
        store,
        config.profile.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use userauths_application::NewAccount;

    #[tokio::test]
    async fn test_data_file_flag_overrides_config() {
        let temp_dir = TempDir::new().unwrap();
        let configured = temp_dir.path().join("configured.json");
        let flag = temp_dir.path().join("flag.json");

        let mut config = UserAuthsConfig::default();
        config.storage.data_file = Some(configured.clone());

        let service = account_service(&config, Some(flag.clone())).unwrap();
        service.register(NewAccount::new("bob@example.com")).await.unwrap();

        assert!(flag.exists());
        assert!(!configured.exists());
    }

    #[test]
    fn test_explicit_config_path_is_used() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let service = config_service(Some(path.clone())).unwrap();
        assert_eq!(service.path(), path.as_path());
    }
}
