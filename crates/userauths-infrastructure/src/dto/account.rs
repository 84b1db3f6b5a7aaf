//! Account DTOs and migrations
//!
//! ## Version History
//! - **1.0.0**: Initial schema

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use version_migrate::{FromDomain, IntoDomain, Versioned};

use userauths_core::account::Account;
use userauths_core::{AccountId, Result, UserAuthsError};

/// Entity name used in stored documents.
pub const ACCOUNT_ENTITY: &str = "account";

/// Account DTO V1.0.0
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct AccountV1_0_0 {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

/// Convert AccountV1_0_0 DTO to domain model
impl IntoDomain<Account> for AccountV1_0_0 {
    fn into_domain(self) -> Account {
        Account {
            id: self.id.map(AccountId::from),
            username: self.username,
            email: self.email,
            full_name: self.full_name,
            phone: self.phone,
            password_hash: self.password_hash,
        }
    }
}

/// Convert domain model to AccountV1_0_0 DTO for persistence
impl FromDomain<Account> for AccountV1_0_0 {
    fn from_domain(account: Account) -> Self {
        AccountV1_0_0 {
            id: account.id.map(AccountId::into_uuid),
            username: account.username,
            email: account.email,
            full_name: account.full_name,
            phone: account.phone,
            password_hash: account.password_hash,
        }
    }
}

/// Creates a Migrator for Account entities.
///
/// # Migration Path
///
/// - V1.0.0 → Account: Converts DTO to domain model
pub fn create_account_migrator() -> Result<version_migrate::Migrator> {
    let mut migrator = version_migrate::Migrator::builder().build();

    let account_path = version_migrate::Migrator::define(ACCOUNT_ENTITY)
        .from::<AccountV1_0_0>()
        .into_with_save::<Account>();

    migrator.register(account_path).map_err(|e| {
        UserAuthsError::migration(format!("Failed to register account migration path: {}", e))
    })?;

    Ok(migrator)
}
