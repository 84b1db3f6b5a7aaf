//! Profile repository trait.

use async_trait::async_trait;

use super::model::Profile;
use super::public_id::PublicId;
use crate::error::Result;
use crate::ids::{AccountId, ProfileId};

/// Persistence contract for profiles.
///
/// On insert the repository assigns `id`, stamps `created_at` and generates a
/// unique `public_id`. On update those three values are carried over from the
/// stored record regardless of what the caller passed in.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Inserts the profile when `id` is `None`, otherwise updates it.
    ///
    /// # Returns
    ///
    /// - `Ok(Profile)`: The stored record with storage-assigned fields populated
    /// - `Err(MissingOwnerReference)`: `owner` does not name an existing account
    /// - `Err(NotFound)`: `id` was set but no such profile exists
    async fn save(&self, profile: Profile) -> Result<Profile>;

    async fn find_by_id(&self, id: ProfileId) -> Result<Option<Profile>>;

    async fn find_by_public_id(&self, public_id: &PublicId) -> Result<Option<Profile>>;

    /// Lists the profiles owned by an account, oldest first.
    async fn list_by_owner(&self, owner: AccountId) -> Result<Vec<Profile>>;

    /// Lists all profiles, oldest first.
    async fn list_all(&self) -> Result<Vec<Profile>>;
}
