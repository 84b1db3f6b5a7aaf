//! In-memory account and profile store.
//!
//! Nothing survives the process. Used by tests and by callers that bring
//! their own persistence.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use userauths_core::account::{Account, AccountRepository};
use userauths_core::config::PublicIdSettings;
use userauths_core::profile::{Profile, ProfileRepository, PublicId, PublicIdGenerator};
use userauths_core::{AccountId, ProfileId, Result};

use crate::public_id_generator::RandomPublicIdGenerator;
use crate::storage::UserTables;

/// Implements both repository traits over one set of tables, so cascade
/// deletion and owner checks see a consistent view.
pub struct InMemoryUserStore {
    tables: RwLock<UserTables>,
    generator: Arc<dyn PublicIdGenerator>,
}

impl InMemoryUserStore {
    pub fn new(generator: Arc<dyn PublicIdGenerator>) -> Self {
        Self {
            tables: RwLock::new(UserTables::new()),
            generator,
        }
    }

    /// Creates a store that generates random ids shaped by `settings`.
    pub fn with_settings(settings: &PublicIdSettings) -> Result<Self> {
        let generator = RandomPublicIdGenerator::new(settings)?;
        Ok(Self::new(Arc::new(generator)))
    }
}

#[async_trait]
impl AccountRepository for InMemoryUserStore {
    async fn save(&self, account: Account) -> Result<Account> {
        let email = account.email.clone();
        let mut tables = self.tables.write().await;
        let saved = tables.save_account(account).inspect_err(|e| {
            if e.is_uniqueness_violation() {
                tracing::warn!("Rejected account {}: {}", email, e);
            }
        })?;
        tracing::debug!("Saved account {}", saved);
        Ok(saved)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>> {
        Ok(self.tables.read().await.account(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        Ok(self.tables.read().await.account_by_email(email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        Ok(self.tables.read().await.account_by_username(username).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Account>> {
        let tables = self.tables.read().await;
        Ok(tables.accounts().into_iter().cloned().collect())
    }

    async fn delete(&self, id: AccountId) -> Result<usize> {
        let removed = self.tables.write().await.delete_account(id)?;
        tracing::info!("Deleted account {} and {} profile(s)", id, removed);
        Ok(removed)
    }
}

#[async_trait]
impl ProfileRepository for InMemoryUserStore {
    async fn save(&self, profile: Profile) -> Result<Profile> {
        let owner = profile.owner;
        let mut tables = self.tables.write().await;
        let saved = tables
            .save_profile(profile, self.generator.as_ref())
            .inspect_err(|e| {
                if e.is_uniqueness_violation() {
                    tracing::warn!("Rejected profile for account {}: {}", owner, e);
                }
            })?;
        tracing::debug!("Saved profile {:?} for account {}", saved.public_id, saved.owner);
        Ok(saved)
    }

    async fn find_by_id(&self, id: ProfileId) -> Result<Option<Profile>> {
        Ok(self.tables.read().await.profile(id).cloned())
    }

    async fn find_by_public_id(&self, public_id: &PublicId) -> Result<Option<Profile>> {
        Ok(self.tables.read().await.profile_by_public_id(public_id).cloned())
    }

    async fn list_by_owner(&self, owner: AccountId) -> Result<Vec<Profile>> {
        let tables = self.tables.read().await;
        Ok(tables.profiles_of(owner).into_iter().cloned().collect())
    }

    async fn list_all(&self) -> Result<Vec<Profile>> {
        let tables = self.tables.read().await;
        Ok(tables.profiles().into_iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryUserStore {
        InMemoryUserStore::with_settings(&PublicIdSettings::default()).unwrap()
    }

    fn account(email: &str, username: &str) -> Account {
        Account::new(email).with_username(username)
    }

    #[tokio::test]
    async fn test_second_account_with_same_email_fails() {
        let store = store();
        AccountRepository::save(&store, account("bob@example.com", "bob"))
            .await
            .unwrap();

        let err = AccountRepository::save(&store, account("bob@example.com", "robert"))
            .await
            .unwrap_err();

        assert!(err.is_uniqueness_violation());
        assert_eq!(AccountRepository::list_all(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_by_login_and_username() {
        let store = store();
        let saved = AccountRepository::save(&store, account("bob@example.com", "bob"))
            .await
            .unwrap();

        let by_email = store.find_by_email("bob@example.com").await.unwrap();
        let by_username = store.find_by_username("bob").await.unwrap();

        assert_eq!(by_email, Some(saved.clone()));
        assert_eq!(by_username, Some(saved));
        assert!(store.find_by_email("BOB@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_public_id_survives_resave() {
        let store = store();
        let owner = AccountRepository::save(&store, account("alice@example.com", "alice"))
            .await
            .unwrap();

        let created = ProfileRepository::save(&store, Profile::new(owner.id.unwrap()))
            .await
            .unwrap();
        let public_id = created.public_id.clone().unwrap();

        let mut edited = created.clone();
        edited.about = Some("Rustacean".to_string());
        let resaved = ProfileRepository::save(&store, edited).await.unwrap();

        assert_eq!(resaved.public_id.as_ref(), Some(&public_id));
        assert_eq!(resaved.created_at, created.created_at);
        let found = store.find_by_public_id(&public_id).await.unwrap().unwrap();
        assert_eq!(found.about.as_deref(), Some("Rustacean"));
    }

    #[tokio::test]
    async fn test_delete_cascades() {
        let store = store();
        let owner = AccountRepository::save(&store, account("alice@example.com", "alice"))
            .await
            .unwrap();
        let owner_id = owner.id.unwrap();
        ProfileRepository::save(&store, Profile::new(owner_id)).await.unwrap();

        let removed = AccountRepository::delete(&store, owner_id).await.unwrap();

        assert_eq!(removed, 1);
        assert!(store.list_by_owner(owner_id).await.unwrap().is_empty());
        assert!(ProfileRepository::list_all(&store).await.unwrap().is_empty());
    }
}
