//! Externally shareable profile identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::PublicIdSettings;
use crate::error::{Result, UserAuthsError};

/// Short, unique identifier that is safe to expose in URLs.
///
/// Distinct from the internal [`ProfileId`](crate::ids::ProfileId). A
/// repository assigns it once, on first insert, and never regenerates it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicId(String);

impl PublicId {
    /// Validates user input against the configured alphabet and maximum length.
    pub fn parse(value: &str, settings: &PublicIdSettings) -> Result<Self> {
        if value.is_empty() {
            return Err(UserAuthsError::invalid_field("public_id", "must not be empty"));
        }
        if value.chars().count() > settings.max_length {
            return Err(UserAuthsError::invalid_field(
                "public_id",
                format!("longer than {} characters", settings.max_length),
            ));
        }
        if let Some(bad) = value.chars().find(|c| !settings.alphabet.contains(*c)) {
            return Err(UserAuthsError::invalid_field(
                "public_id",
                format!("'{}' is not in the alphabet '{}'", bad, settings.alphabet),
            ));
        }
        Ok(Self(value.to_string()))
    }

    /// Wraps a value produced by a generator or read back from storage.
    pub fn from_trusted(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of fresh `public_id` candidates.
///
/// Generators are not required to guarantee uniqueness; repositories retry
/// on collision.
pub trait PublicIdGenerator: Send + Sync {
    fn generate(&self) -> PublicId;
}
