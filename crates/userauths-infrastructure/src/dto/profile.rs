//! Profile DTOs and migrations
//!
//! ## Version History
//! - **1.0.0**: Legacy column names (`user`, `date`, `pid`)
//! - **1.1.0**: Renamed to `owner`, `created_at`, `public_id`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use version_migrate::{FromDomain, IntoDomain, MigratesTo, Versioned};

use userauths_core::profile::{Profile, PublicId};
use userauths_core::{AccountId, ProfileId, Result, UserAuthsError};

/// Entity name used in stored documents.
pub const PROFILE_ENTITY: &str = "profile";

/// Profile DTO V1.0.0 (legacy column names).
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct ProfileV1_0_0 {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Owning account.
    pub user: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    /// Short public identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<String>,
}

/// Profile DTO V1.1.0
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
pub struct ProfileV1_1_0 {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub owner: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
}

// ============================================================================
// Migration implementations
// ============================================================================

/// Migration from ProfileV1_0_0 to ProfileV1_1_0: column renames only.
impl MigratesTo<ProfileV1_1_0> for ProfileV1_0_0 {
    fn migrate(self) -> ProfileV1_1_0 {
        ProfileV1_1_0 {
            id: self.id,
            owner: self.user,
            image: self.image,
            full_name: self.full_name,
            about: self.about,
            gender: self.gender,
            country: self.country,
            state: self.state,
            address: self.address,
            created_at: self.date,
            public_id: self.pid,
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

/// Convert ProfileV1_1_0 DTO to domain model
impl IntoDomain<Profile> for ProfileV1_1_0 {
    fn into_domain(self) -> Profile {
        Profile {
            id: self.id.map(ProfileId::from),
            owner: AccountId::from(self.owner),
            image: self.image,
            full_name: self.full_name,
            about: self.about,
            gender: self.gender,
            country: self.country,
            state: self.state,
            address: self.address,
            created_at: self.created_at,
            public_id: self.public_id.map(PublicId::from_trusted),
        }
    }
}

/// Convert domain model to ProfileV1_1_0 DTO for persistence
impl FromDomain<Profile> for ProfileV1_1_0 {
    fn from_domain(profile: Profile) -> Self {
        ProfileV1_1_0 {
            id: profile.id.map(ProfileId::into_uuid),
            owner: profile.owner.into_uuid(),
            image: profile.image,
            full_name: profile.full_name,
            about: profile.about,
            gender: profile.gender,
            country: profile.country,
            state: profile.state,
            address: profile.address,
            created_at: profile.created_at,
            public_id: profile.public_id.map(|id| id.as_str().to_string()),
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates a Migrator for Profile entities.
///
/// # Migration Path
///
/// - V1.0.0 → V1.1.0: Renames `user`, `date`, `pid`
/// - V1.1.0 → Profile: Converts DTO to domain model
pub fn create_profile_migrator() -> Result<version_migrate::Migrator> {
    let mut migrator = version_migrate::Migrator::builder().build();

    let profile_path = version_migrate::Migrator::define(PROFILE_ENTITY)
        .from::<ProfileV1_0_0>()
        .step::<ProfileV1_1_0>()
        .into_with_save::<Profile>();

    migrator.register(profile_path).map_err(|e| {
        UserAuthsError::migration(format!("Failed to register profile migration path: {}", e))
    })?;

    Ok(migrator)
}
