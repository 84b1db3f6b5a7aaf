//! File-backed account and profile store.
//!
//! The whole store is one JSON document of versioned rows. Every mutation
//! takes the file lock, re-reads and migrates the current document, applies
//! the change, and writes the result before releasing the lock. Handles in
//! other processes therefore never overwrite each other's rows, and the
//! uniqueness checks run against what is actually on disk. A failed
//! mutation leaves both the file and the in-memory view unchanged.
//!
//! Reads are served from the tables as of the last open or mutation.
//!
//! File location: `{data_dir}/userauths/store.json` unless configured.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use version_migrate::Migrator;

use userauths_core::account::{Account, AccountRepository};
use userauths_core::profile::{Profile, ProfileRepository, PublicId, PublicIdGenerator};
use userauths_core::{AccountId, ProfileId, Result, UserAuthsError};

use crate::dto::{
    ACCOUNT_ENTITY, PROFILE_ENTITY, StoreDocument, create_account_migrator,
    create_profile_migrator,
};
use crate::storage::{AtomicFile, FileFormat, UserTables};

pub struct FileUserStore {
    file: AtomicFile<StoreDocument>,
    tables: Mutex<UserTables>,
    generator: Arc<dyn PublicIdGenerator>,
    rows: RowCodec,
}

impl FileUserStore {
    /// Opens the store at `path`, migrating any older row versions.
    ///
    /// A missing file is an empty store; it is created on the first write.
    pub fn open(path: PathBuf, generator: Arc<dyn PublicIdGenerator>) -> Result<Self> {
        let file = AtomicFile::new(path, FileFormat::Json);
        let rows = RowCodec::new()?;

        let tables = rows.read(file.load()?.unwrap_or_default())?;

        tracing::info!(
            "Opened user store {:?} ({} accounts, {} profiles)",
            file.path(),
            tables.accounts().len(),
            tables.profiles().len()
        );

        Ok(Self {
            file,
            tables: Mutex::new(tables),
            generator,
            rows,
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Applies `op` to the tables as currently stored on disk, persists the
    /// result under the file lock, then makes it visible to this handle.
    async fn mutate<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut UserTables) -> Result<T>,
    {
        let mut tables = self.tables.lock().await;
        let (next, value) = self.file.update(|document| {
            let mut next = self.rows.read(std::mem::take(document))?;
            let value = op(&mut next)?;
            *document = self.rows.write(&next)?;
            Ok((next, value))
        })?;
        tracing::debug!("Wrote user store {:?}", self.file.path());
        *tables = next;
        Ok(value)
    }
}

/// Converts between the stored document and in-process tables.
struct RowCodec {
    accounts: Migrator,
    profiles: Migrator,
}

impl RowCodec {
    fn new() -> Result<Self> {
        Ok(Self {
            accounts: create_account_migrator()?,
            profiles: create_profile_migrator()?,
        })
    }

    /// Migrates every row to the current schema and re-checks the invariants.
    fn read(&self, document: StoreDocument) -> Result<UserTables> {
        let accounts = document
            .accounts
            .into_iter()
            .map(|row| decode::<Account>(&self.accounts, ACCOUNT_ENTITY, row))
            .collect::<Result<Vec<_>>>()?;
        let profiles = document
            .profiles
            .into_iter()
            .map(|row| decode::<Profile>(&self.profiles, PROFILE_ENTITY, row))
            .collect::<Result<Vec<_>>>()?;

        UserTables::from_rows(accounts, profiles)
    }

    fn write(&self, tables: &UserTables) -> Result<StoreDocument> {
        let accounts = tables
            .accounts()
            .into_iter()
            .map(|account| encode(&self.accounts, ACCOUNT_ENTITY, account))
            .collect::<Result<Vec<_>>>()?;
        let profiles = tables
            .profiles()
            .into_iter()
            .map(|profile| encode(&self.profiles, PROFILE_ENTITY, profile))
            .collect::<Result<Vec<_>>>()?;

        Ok(StoreDocument { accounts, profiles })
    }
}

fn decode<T>(migrator: &Migrator, entity: &'static str, row: JsonValue) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    migrator
        .load_flat_from(entity, row)
        .map_err(|e| UserAuthsError::migration(format!("Failed to migrate {} row: {}", entity, e)))
}

fn encode<T: Serialize>(
    migrator: &Migrator,
    entity: &'static str,
    record: &T,
) -> Result<JsonValue> {
    let json = migrator
        .save_domain_flat(entity, record)
        .map_err(|e| UserAuthsError::migration(format!("Failed to serialize {}: {}", entity, e)))?;
    Ok(serde_json::from_str(&json)?)
}

#[async_trait]
impl AccountRepository for FileUserStore {
    async fn save(&self, account: Account) -> Result<Account> {
        let email = account.email.clone();
        let saved = self
            .mutate(|tables| tables.save_account(account))
            .await
            .inspect_err(|e| {
                if e.is_uniqueness_violation() {
                    tracing::warn!("Rejected account {}: {}", email, e);
                }
            })?;
        tracing::debug!("Saved account {}", saved);
        Ok(saved)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>> {
        Ok(self.tables.lock().await.account(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        Ok(self.tables.lock().await.account_by_email(email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        Ok(self.tables.lock().await.account_by_username(username).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Account>> {
        let tables = self.tables.lock().await;
        Ok(tables.accounts().into_iter().cloned().collect())
    }

    async fn delete(&self, id: AccountId) -> Result<usize> {
        let removed = self.mutate(|tables| tables.delete_account(id)).await?;
        tracing::info!("Deleted account {} and {} profile(s)", id, removed);
        Ok(removed)
    }
}

#[async_trait]
impl ProfileRepository for FileUserStore {
    async fn save(&self, profile: Profile) -> Result<Profile> {
        let owner = profile.owner;
        let generator = self.generator.as_ref();
        let saved = self
            .mutate(|tables| tables.save_profile(profile, generator))
            .await
            .inspect_err(|e| {
                if e.is_uniqueness_violation() {
                    tracing::warn!("Rejected profile for account {}: {}", owner, e);
                }
            })?;
        tracing::debug!("Saved profile {:?} for account {}", saved.public_id, saved.owner);
        Ok(saved)
    }

    async fn find_by_id(&self, id: ProfileId) -> Result<Option<Profile>> {
        Ok(self.tables.lock().await.profile(id).cloned())
    }

    async fn find_by_public_id(&self, public_id: &PublicId) -> Result<Option<Profile>> {
        Ok(self.tables.lock().await.profile_by_public_id(public_id).cloned())
    }

    async fn list_by_owner(&self, owner: AccountId) -> Result<Vec<Profile>> {
        let tables = self.tables.lock().await;
        Ok(tables.profiles_of(owner).into_iter().cloned().collect())
    }

    async fn list_all(&self) -> Result<Vec<Profile>> {
        let tables = self.tables.lock().await;
        Ok(tables.profiles().into_iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::public_id_generator::RandomPublicIdGenerator;
    use crate::storage::tables::tests::SequenceGenerator;
    use tempfile::TempDir;
    use userauths_core::config::PublicIdSettings;

    fn random_generator() -> Arc<dyn PublicIdGenerator> {
        Arc::new(RandomPublicIdGenerator::new(&PublicIdSettings::default()).unwrap())
    }

    fn account(email: &str, username: &str) -> Account {
        Account::new(email).with_username(username)
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");

        let (account, profile) = {
            let store = FileUserStore::open(path.clone(), random_generator()).unwrap();
            let account = AccountRepository::save(
                &store,
                Account::new("alice@example.com")
                    .with_username("alice")
                    .with_full_name("Alice"),
            )
            .await
            .unwrap();
            let profile = ProfileRepository::save(&store, Profile::new(account.id.unwrap()))
                .await
                .unwrap();
            (account, profile)
        };

        let reopened = FileUserStore::open(path, random_generator()).unwrap();

        assert_eq!(
            reopened.find_by_email("alice@example.com").await.unwrap(),
            Some(account)
        );
        let public_id = profile.public_id.clone().unwrap();
        assert_eq!(
            reopened.find_by_public_id(&public_id).await.unwrap(),
            Some(profile)
        );
    }

    #[tokio::test]
    async fn test_rejected_write_leaves_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        let store = FileUserStore::open(path.clone(), random_generator()).unwrap();

        AccountRepository::save(&store, account("bob@example.com", "bob"))
            .await
            .unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        let err = AccountRepository::save(&store, account("bob@example.com", "rob"))
            .await
            .unwrap_err();

        assert!(err.is_uniqueness_violation());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[tokio::test]
    async fn test_handles_sharing_a_file_see_each_others_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        let first = FileUserStore::open(path.clone(), random_generator()).unwrap();
        let second = FileUserStore::open(path.clone(), random_generator()).unwrap();

        AccountRepository::save(&first, account("alice@example.com", "alice"))
            .await
            .unwrap();

        // The second handle opened before the first write and must still see it
        let err = AccountRepository::save(&second, account("alice@example.com", "alice2"))
            .await
            .unwrap_err();
        assert!(err.is_uniqueness_violation());

        AccountRepository::save(&second, account("bob@example.com", "bob"))
            .await
            .unwrap();

        let reopened = FileUserStore::open(path, random_generator()).unwrap();
        let rows: Vec<(String, String)> = AccountRepository::list_all(&reopened)
            .await
            .unwrap()
            .into_iter()
            .map(|a| (a.email, a.username))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("alice@example.com".to_string(), "alice".to_string()),
                ("bob@example.com".to_string(), "bob".to_string()),
            ]
        );
        assert!(second.find_by_email("alice@example.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_cascade_is_persisted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        let generator = Arc::new(SequenceGenerator::new(&["aaaaaaaaaa", "bbbbbbbbbb"]));
        let store = FileUserStore::open(path.clone(), generator).unwrap();

        let alice = AccountRepository::save(&store, account("alice@example.com", "alice"))
            .await
            .unwrap();
        let bob = AccountRepository::save(&store, account("bob@example.com", "bob"))
            .await
            .unwrap();
        ProfileRepository::save(&store, Profile::new(alice.id.unwrap())).await.unwrap();
        ProfileRepository::save(&store, Profile::new(bob.id.unwrap())).await.unwrap();

        AccountRepository::delete(&store, alice.id.unwrap()).await.unwrap();

        let reopened = FileUserStore::open(path, random_generator()).unwrap();
        let profiles = ProfileRepository::list_all(&reopened).await.unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].owner, bob.id.unwrap());
    }

    #[tokio::test]
    async fn test_opens_legacy_profile_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        let legacy = serde_json::json!({
            "accounts": [{
                "version": "1.0.0",
                "id": "550e8400-e29b-41d4-a716-446655440000",
                "username": "alice",
                "email": "alice@example.com",
                "full_name": "Alice"
            }],
            "profiles": [{
                "version": "1.0.0",
                "id": "660e8400-e29b-41d4-a716-446655440001",
                "user": "550e8400-e29b-41d4-a716-446655440000",
                "date": "2025-01-01T00:00:00Z",
                "pid": "abcdefghij"
            }]
        });
        std::fs::write(&path, legacy.to_string()).unwrap();

        let store = FileUserStore::open(path.clone(), random_generator()).unwrap();
        let public_id = PublicId::from_trusted("abcdefghij");
        let profile = store.find_by_public_id(&public_id).await.unwrap().unwrap();
        assert_eq!(profile.owner.to_string(), "550e8400-e29b-41d4-a716-446655440000");

        // Any write rewrites rows at the latest schema version
        ProfileRepository::save(&store, profile).await.unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"public_id\": \"abcdefghij\""));
        assert!(!raw.contains("\"pid\""));
    }

    #[test]
    fn test_orphan_rows_are_rejected_on_open() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        let orphan = serde_json::json!({
            "profiles": [{
                "version": "1.1.0",
                "id": "660e8400-e29b-41d4-a716-446655440001",
                "owner": "550e8400-e29b-41d4-a716-446655440000",
                "public_id": "abcdefghij"
            }]
        });
        std::fs::write(&path, orphan.to_string()).unwrap();

        let result = FileUserStore::open(path, random_generator());
        assert!(matches!(result, Err(e) if e.is_missing_owner()));
    }
}
