//! In-process account and profile tables.
//!
//! Holds the storage-layer rules both stores share: surrogate key
//! assignment, uniqueness, owner checks, creation stamping, `public_id`
//! generation and cascade deletion. The stores add locking and, for the
//! file store, persistence on top.

use chrono::Utc;
use std::collections::HashMap;

use userauths_core::account::Account;
use userauths_core::profile::{Profile, PublicId, PublicIdGenerator};
use userauths_core::{AccountId, ProfileId, Result, UserAuthsError};

/// Fresh `public_id` candidates tried before an insert gives up.
pub const MAX_PUBLIC_ID_ATTEMPTS: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct UserTables {
    accounts: HashMap<AccountId, Account>,
    profiles: HashMap<ProfileId, Profile>,
}

impl UserTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds tables from stored rows, checking the invariants on the way.
    pub fn from_rows(accounts: Vec<Account>, profiles: Vec<Profile>) -> Result<Self> {
        let mut tables = Self::new();

        for account in accounts {
            let id = account
                .id
                .ok_or_else(|| UserAuthsError::data_access("stored account without id"))?;
            tables.ensure_account_unique(id, &account)?;
            tables.accounts.insert(id, account);
        }

        for profile in profiles {
            let id = profile
                .id
                .ok_or_else(|| UserAuthsError::data_access("stored profile without id"))?;
            if !tables.accounts.contains_key(&profile.owner) {
                return Err(UserAuthsError::missing_owner(profile.owner));
            }
            let public_id = profile.public_id.as_ref().ok_or_else(|| {
                UserAuthsError::data_access(format!("stored profile {} without public_id", id))
            })?;
            if tables.public_id_taken(public_id) {
                return Err(UserAuthsError::uniqueness("profile", "public_id", public_id.as_str()));
            }
            tables.profiles.insert(id, profile);
        }

        Ok(tables)
    }

    // ============================================================================
    // Accounts
    // ============================================================================

    pub fn save_account(&mut self, mut account: Account) -> Result<Account> {
        let id = match account.id {
            Some(id) if self.accounts.contains_key(&id) => id,
            Some(id) => return Err(UserAuthsError::not_found("account", id)),
            None => AccountId::generate(),
        };

        self.ensure_account_unique(id, &account)?;

        account.id = Some(id);
        self.accounts.insert(id, account.clone());
        Ok(account)
    }

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    pub fn account_by_email(&self, email: &str) -> Option<&Account> {
        self.accounts.values().find(|a| a.email == email)
    }

    pub fn account_by_username(&self, username: &str) -> Option<&Account> {
        self.accounts.values().find(|a| a.username == username)
    }

    /// All accounts ordered by email.
    pub fn accounts(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by(|a, b| a.email.cmp(&b.email));
        accounts
    }

    /// Removes the account and its profiles; returns how many profiles went with it.
    pub fn delete_account(&mut self, id: AccountId) -> Result<usize> {
        if self.accounts.remove(&id).is_none() {
            return Err(UserAuthsError::not_found("account", id));
        }

        let before = self.profiles.len();
        self.profiles.retain(|_, profile| profile.owner != id);
        Ok(before - self.profiles.len())
    }

    fn ensure_account_unique(&self, id: AccountId, account: &Account) -> Result<()> {
        for other in self.accounts.values().filter(|a| a.id != Some(id)) {
            if other.email == account.email {
                return Err(UserAuthsError::uniqueness("account", "email", &account.email));
            }
            if other.username == account.username {
                return Err(UserAuthsError::uniqueness(
                    "account",
                    "username",
                    &account.username,
                ));
            }
        }
        Ok(())
    }

    // ============================================================================
    // Profiles
    // ============================================================================

    pub fn save_profile(
        &mut self,
        mut profile: Profile,
        generator: &dyn PublicIdGenerator,
    ) -> Result<Profile> {
        if !self.accounts.contains_key(&profile.owner) {
            return Err(UserAuthsError::missing_owner(profile.owner));
        }

        let id = match profile.id {
            Some(id) => {
                let stored = self
                    .profiles
                    .get(&id)
                    .ok_or_else(|| UserAuthsError::not_found("profile", id))?;
                profile.created_at = stored.created_at;
                profile.public_id = stored.public_id.clone();
                id
            }
            None => {
                let id = ProfileId::generate();
                profile.public_id = Some(self.fresh_public_id(generator)?);
                profile.id = Some(id);
                profile.created_at = Some(Utc::now());
                id
            }
        };

        self.profiles.insert(id, profile.clone());
        Ok(profile)
    }

    pub fn profile(&self, id: ProfileId) -> Option<&Profile> {
        self.profiles.get(&id)
    }

    pub fn profile_by_public_id(&self, public_id: &PublicId) -> Option<&Profile> {
        self.profiles
            .values()
            .find(|p| p.public_id.as_ref() == Some(public_id))
    }

    /// Profiles of one owner, oldest first.
    pub fn profiles_of(&self, owner: AccountId) -> Vec<&Profile> {
        let mut profiles: Vec<&Profile> = self
            .profiles
            .values()
            .filter(|p| p.owner == owner)
            .collect();
        profiles.sort_by_key(|p| p.created_at);
        profiles
    }

    /// All profiles, oldest first.
    pub fn profiles(&self) -> Vec<&Profile> {
        let mut profiles: Vec<&Profile> = self.profiles.values().collect();
        profiles.sort_by_key(|p| p.created_at);
        profiles
    }

    fn public_id_taken(&self, candidate: &PublicId) -> bool {
        self.profile_by_public_id(candidate).is_some()
    }

    fn fresh_public_id(&self, generator: &dyn PublicIdGenerator) -> Result<PublicId> {
        let mut last = None;
        for attempt in 1..=MAX_PUBLIC_ID_ATTEMPTS {
            let candidate = generator.generate();
            if !self.public_id_taken(&candidate) {
                return Ok(candidate);
            }
            tracing::warn!(
                "public_id collision on attempt {}/{}: {}",
                attempt,
                MAX_PUBLIC_ID_ATTEMPTS,
                candidate
            );
            last = Some(candidate);
        }

        let value = last.map(|id| id.to_string()).unwrap_or_default();
        Err(UserAuthsError::uniqueness("profile", "public_id", value))
    }
}
