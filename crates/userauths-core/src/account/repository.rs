//! Account repository trait.

use async_trait::async_trait;

use super::model::Account;
use crate::error::Result;
use crate::ids::AccountId;

/// Persistence contract for accounts.
///
/// Implementations own identifier assignment and the uniqueness of
/// `email` and `username`. Callers are expected to run
/// [`Account::prepare_for_save`] first; repositories store what they are given.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Inserts the account when `id` is `None`, otherwise updates it.
    ///
    /// # Returns
    ///
    /// - `Ok(Account)`: The stored record, with its id assigned
    /// - `Err(UniquenessViolation)`: `email` or `username` belongs to another account
    /// - `Err(NotFound)`: `id` was set but no such account exists
    async fn save(&self, account: Account) -> Result<Account>;

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>>;

    /// Looks up an account by its login identifier.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>>;

    /// Lists all accounts ordered by email.
    async fn list_all(&self) -> Result<Vec<Account>>;

    /// Deletes the account and every profile it owns.
    ///
    /// # Returns
    ///
    /// - `Ok(usize)`: Number of profiles removed by the cascade
    /// - `Err(NotFound)`: No such account
    async fn delete(&self, id: AccountId) -> Result<usize>;
}
