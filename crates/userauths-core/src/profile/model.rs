//! Profile domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::public_id::PublicId;
use crate::account::Account;
use crate::config::ProfileSettings;
use crate::error::{Result, UserAuthsError};
use crate::fields::{MAX_FULL_NAME_LENGTH, MAX_SHORT_TEXT_LENGTH, check_optional_length, is_blank};
use crate::ids::{AccountId, ProfileId};

/// Extended personal and display data owned by exactly one account.
///
/// `id`, `created_at` and `public_id` are populated by the repository on
/// first insert and are never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Option<ProfileId>,
    /// Owning account. Deleting it deletes this profile.
    pub owner: AccountId,
    /// Reference to a stored image resource.
    pub image: Option<String>,
    pub full_name: Option<String>,
    pub about: Option<String>,
    pub gender: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub public_id: Option<PublicId>,
}

impl Profile {
    /// Creates an empty, unsaved profile for `owner`.
    pub fn new(owner: AccountId) -> Self {
        Self {
            id: None,
            owner,
            image: None,
            full_name: None,
            about: None,
            gender: None,
            country: None,
            state: None,
            address: None,
            created_at: None,
            public_id: None,
        }
    }

    /// Runs the save-time fix-ups against the owning account.
    ///
    /// A blank `full_name` takes the owner's `full_name`; a blank `image`
    /// takes the configured placeholder. `owner` must be the account this
    /// profile points at.
    pub fn prepare_for_save(&mut self, owner: &Account, settings: &ProfileSettings) -> Result<()> {
        if owner.id != Some(self.owner) {
            return Err(UserAuthsError::missing_owner(self.owner));
        }

        if is_blank(self.full_name.as_deref()) {
            self.full_name = owner.full_name.clone();
        }
        if is_blank(self.image.as_deref()) {
            self.image = Some(settings.default_image.clone());
        }

        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        check_optional_length("full_name", self.full_name.as_deref(), MAX_FULL_NAME_LENGTH)?;
        check_optional_length("gender", self.gender.as_deref(), MAX_SHORT_TEXT_LENGTH)?;
        check_optional_length("country", self.country.as_deref(), MAX_SHORT_TEXT_LENGTH)?;
        check_optional_length("state", self.state.as_deref(), MAX_SHORT_TEXT_LENGTH)?;
        check_optional_length("address", self.address.as_deref(), MAX_SHORT_TEXT_LENGTH)?;
        Ok(())
    }

    /// The profile's own `full_name` if set, otherwise the owner's.
    ///
    /// Empty when neither is set.
    pub fn display_name<'a>(&'a self, owner: &'a Account) -> &'a str {
        match self.full_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => owner.full_name.as_deref().unwrap_or_default(),
        }
    }

    /// Pairs the profile with its owner for `Display`.
    pub fn display<'a>(&'a self, owner: &'a Account) -> ProfileDisplay<'a> {
        ProfileDisplay {
            profile: self,
            owner,
        }
    }

    /// The stored image reference, or the placeholder for unsaved profiles.
    pub fn image_or_default<'a>(&'a self, settings: &'a ProfileSettings) -> &'a str {
        match self.image.as_deref() {
            Some(image) if !image.is_empty() => image,
            _ => &settings.default_image,
        }
    }
}

/// Human-readable form of a profile: its display name.
pub struct ProfileDisplay<'a> {
    profile: &'a Profile,
    owner: &'a Account,
}

impl fmt::Display for ProfileDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile.display_name(self.owner))
    }
}
