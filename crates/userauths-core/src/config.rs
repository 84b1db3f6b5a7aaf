//! Configuration types.
//!
//! Loading from disk lives in the infrastructure crate; this module only
//! describes the shape and the defaults of `config.toml`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::{Result, UserAuthsError};

/// Placeholder image reference for profiles without an uploaded image.
pub const DEFAULT_PROFILE_IMAGE: &str = "default/default-user.jpg";

/// Alphabet `public_id` values are drawn from.
pub const DEFAULT_PUBLIC_ID_ALPHABET: &str = "abcdefghijk";

/// Number of characters in a generated `public_id`.
pub const DEFAULT_PUBLIC_ID_LENGTH: usize = 10;

/// Maximum stored length of a `public_id`.
pub const DEFAULT_PUBLIC_ID_MAX_LENGTH: usize = 20;

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserAuthsConfig {
    pub profile: ProfileSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

impl UserAuthsConfig {
    /// Checks cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<()> {
        self.profile.validate()
    }
}

/// Settings consulted when a profile is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    /// Image reference assigned to profiles saved without one.
    pub default_image: String,
    pub public_id: PublicIdSettings,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            default_image: DEFAULT_PROFILE_IMAGE.to_string(),
            public_id: PublicIdSettings::default(),
        }
    }
}

impl ProfileSettings {
    pub fn validate(&self) -> Result<()> {
        if self.default_image.is_empty() {
            return Err(UserAuthsError::config("profile.default_image must not be empty"));
        }
        self.public_id.validate()
    }
}

/// Shape of generated `public_id` values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicIdSettings {
    pub alphabet: String,
    pub length: usize,
    pub max_length: usize,
}

impl Default for PublicIdSettings {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_PUBLIC_ID_ALPHABET.to_string(),
            length: DEFAULT_PUBLIC_ID_LENGTH,
            max_length: DEFAULT_PUBLIC_ID_MAX_LENGTH,
        }
    }
}

impl PublicIdSettings {
    pub fn validate(&self) -> Result<()> {
        let distinct: HashSet<char> = self.alphabet.chars().collect();
        if distinct.len() < 2 {
            return Err(UserAuthsError::config(
                "profile.public_id.alphabet needs at least two distinct characters",
            ));
        }
        if self.length == 0 || self.length > self.max_length {
            return Err(UserAuthsError::config(format!(
                "profile.public_id.length must be between 1 and max_length ({}), got {}",
                self.max_length, self.length
            )));
        }
        Ok(())
    }

    /// Alphabet with duplicates removed, in first-seen order.
    pub fn symbols(&self) -> Vec<char> {
        let mut seen = HashSet::new();
        self.alphabet.chars().filter(|c| seen.insert(*c)).collect()
    }
}

/// Where the file-backed store keeps its data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Overrides the platform data directory location when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
