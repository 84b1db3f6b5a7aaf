//! Account Service
//!
//! Coordinates the save-time rules of accounts and profiles with the
//! repositories that store them. Every write goes through `persist_account`
//! or `persist_profile`, so the derived defaults are applied no matter which
//! entry point created the record.

use std::sync::Arc;

use userauths_core::account::{Account, AccountRepository};
use userauths_core::config::ProfileSettings;
use userauths_core::profile::{Profile, ProfileRepository, PublicId};
use userauths_core::{AccountId, ProfileId, Result, UserAuthsError};

use crate::changes::{AccountChanges, NewAccount, ProfileChanges};

/// An account together with the profile created for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub account: Account,
    pub profile: Profile,
}

pub struct AccountService {
    accounts: Arc<dyn AccountRepository>,
    profiles: Arc<dyn ProfileRepository>,
    settings: ProfileSettings,
}

impl AccountService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        profiles: Arc<dyn ProfileRepository>,
        settings: ProfileSettings,
    ) -> Self {
        Self {
            accounts,
            profiles,
            settings,
        }
    }

    pub fn settings(&self) -> &ProfileSettings {
        &self.settings
    }

    /// Derives blank `full_name`/`username` from the email, then stores.
    ///
    /// Nothing is written when the email is malformed or a unique field
    /// collides.
    pub async fn persist_account(&self, mut account: Account) -> Result<Account> {
        account.prepare_for_save()?;
        self.accounts.save(account).await
    }

    /// Fills a blank `full_name` from the owner and a blank `image` with the
    /// placeholder, then stores. The repository assigns `created_at` and
    /// `public_id` on first save.
    pub async fn persist_profile(&self, mut profile: Profile) -> Result<Profile> {
        let owner = self
            .accounts
            .find_by_id(profile.owner)
            .await?
            .ok_or_else(|| UserAuthsError::missing_owner(profile.owner))?;

        profile.prepare_for_save(&owner, &self.settings)?;
        self.profiles.save(profile).await
    }

    /// Creates an account and its profile.
    ///
    /// If the profile cannot be stored the account is removed again, so a
    /// failed registration leaves no rows behind.
    pub async fn register(&self, new_account: NewAccount) -> Result<Registration> {
        let account = self.persist_account(new_account.into_account()).await?;
        let account_id = account
            .id
            .ok_or_else(|| UserAuthsError::internal("stored account has no id"))?;

        let profile = match self.persist_profile(Profile::new(account_id)).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("Profile creation for {} failed, rolling back: {}", account, e);
                if let Err(rollback) = self.accounts.delete(account_id).await {
                    tracing::error!("Rollback of account {} failed: {}", account, rollback);
                }
                return Err(e);
            }
        };

        tracing::info!(
            "Registered {} as {:?} (profile {})",
            account,
            account.username,
            profile.public_id.as_ref().map(PublicId::as_str).unwrap_or_default()
        );
        Ok(Registration { account, profile })
    }

    pub async fn update_account(&self, id: AccountId, changes: AccountChanges) -> Result<Account> {
        let mut account = self
            .accounts
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserAuthsError::not_found("account", id))?;

        changes.apply_to(&mut account);
        self.persist_account(account).await
    }

    pub async fn update_profile(&self, id: ProfileId, changes: ProfileChanges) -> Result<Profile> {
        let mut profile = self
            .profiles
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserAuthsError::not_found("profile", id))?;

        changes.apply_to(&mut profile);
        self.persist_profile(profile).await
    }

    /// Deletes the account and every profile it owns.
    ///
    /// # Returns
    ///
    /// The number of profiles removed with it.
    pub async fn delete_account(&self, id: AccountId) -> Result<usize> {
        self.accounts.delete(id).await
    }

    /// Looks an account up by its login identifier, the email.
    pub async fn account_by_login(&self, email: &str) -> Result<Option<Account>> {
        self.accounts.find_by_email(email).await
    }

    pub async fn account_by_username(&self, username: &str) -> Result<Option<Account>> {
        self.accounts.find_by_username(username).await
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        self.accounts.list_all().await
    }

    pub async fn profile_by_public_id(&self, public_id: &str) -> Result<Option<Profile>> {
        let public_id = PublicId::parse(public_id, &self.settings.public_id)?;
        self.profiles.find_by_public_id(&public_id).await
    }

    pub async fn profiles_of(&self, account_id: AccountId) -> Result<Vec<Profile>> {
        self.profiles.list_by_owner(account_id).await
    }

    /// The profile's display string, falling back to its owner's name.
    pub async fn profile_display_name(&self, profile: &Profile) -> Result<String> {
        let owner = self
            .accounts
            .find_by_id(profile.owner)
            .await?
            .ok_or_else(|| UserAuthsError::missing_owner(profile.owner))?;
        Ok(profile.display(&owner).to_string())
    }
}
