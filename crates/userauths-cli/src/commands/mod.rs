pub mod delete;
pub mod init_config;
pub mod list;
pub mod profile;
pub mod register;
pub mod show;

use anyhow::Result;
use userauths_application::AccountService;
use userauths_core::account::Account;

/// Resolves a login email to its account or fails with a readable message.
pub(crate) async fn require_account(service: &AccountService, email: &str) -> Result<Account> {
    service
        .account_by_login(email)
        .await?
        .ok_or_else(|| anyhow::anyhow!("No account with email {}", email))
}
