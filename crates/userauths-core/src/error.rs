//! Error types shared by every userauths crate.

use thiserror::Error;

/// A shared error type for account and profile handling.
///
/// Record-level failures (`EmailFormat`, `InvalidField`) come from the
/// default-derivation step of a persist call. Storage-level failures
/// (`UniquenessViolation`, `MissingOwnerReference`, `NotFound`) come from
/// the repository the record is handed to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserAuthsError {
    /// The email does not split into exactly one non-empty local part and a domain.
    #[error("Malformed email address: '{email}'")]
    EmailFormat { email: String },

    /// A value that must be unique is already taken by another record.
    #[error("{entity_type} {field} '{value}' is already in use")]
    UniquenessViolation {
        entity_type: &'static str,
        field: &'static str,
        value: String,
    },

    /// A profile references an account that does not exist.
    #[error("Profile owner '{owner_id}' does not exist")]
    MissingOwnerReference { owner_id: String },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A field violates its declared constraint (length, alphabet, ...).
    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data access error (repository/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl UserAuthsError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an EmailFormat error
    pub fn email_format(email: impl Into<String>) -> Self {
        Self::EmailFormat {
            email: email.into(),
        }
    }

    /// Creates a UniquenessViolation error
    pub fn uniqueness(
        entity_type: &'static str,
        field: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Self::UniquenessViolation {
            entity_type,
            field,
            value: value.into(),
        }
    }

    /// Creates a MissingOwnerReference error
    pub fn missing_owner(owner_id: impl ToString) -> Self {
        Self::MissingOwnerReference {
            owner_id: owner_id.to_string(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Creates an InvalidField error
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates a Migration error
    pub fn migration(message: impl Into<String>) -> Self {
        Self::Migration(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an EmailFormat error
    pub fn is_email_format(&self) -> bool {
        matches!(self, Self::EmailFormat { .. })
    }

    /// Check if this is a UniquenessViolation error
    pub fn is_uniqueness_violation(&self) -> bool {
        matches!(self, Self::UniquenessViolation { .. })
    }

    /// Check if this is a MissingOwnerReference error
    pub fn is_missing_owner(&self) -> bool {
        matches!(self, Self::MissingOwnerReference { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an InvalidField error
    pub fn is_invalid_field(&self) -> bool {
        matches!(self, Self::InvalidField { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for UserAuthsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for UserAuthsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for UserAuthsError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for UserAuthsError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, UserAuthsError>`.
pub type Result<T> = std::result::Result<T, UserAuthsError>;
