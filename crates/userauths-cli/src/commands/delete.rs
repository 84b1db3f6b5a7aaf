use anyhow::{Context, Result};
use userauths_application::AccountService;

use super::require_account;

pub async fn run(service: &AccountService, email: &str) -> Result<()> {
    let account = require_account(service, email).await?;
    let id = account.id.context("Stored account has no id")?;

    let removed = service.delete_account(id).await?;
    println!("🗑️  Deleted {} and {} profile(s)", account, removed);
    Ok(())
}
