use anyhow::{Context, Result};
use clap::Args;
use userauths_application::{AccountService, ProfileChanges};

use super::require_account;

/// Pass an empty string to clear a field.
#[derive(Args)]
pub struct ProfileArgs {
    /// Login email of the owning account
    email: String,
    #[arg(long)]
    full_name: Option<String>,
    #[arg(long)]
    about: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    country: Option<String>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    address: Option<String>,
    /// Image reference; empty restores the placeholder
    #[arg(long)]
    image: Option<String>,
}

pub async fn run(service: &AccountService, args: ProfileArgs) -> Result<()> {
    let account = require_account(service, &args.email).await?;
    let changes = ProfileChanges {
        image: args.image,
        full_name: args.full_name,
        about: args.about,
        gender: args.gender,
        country: args.country,
        state: args.state,
        address: args.address,
    };
    if changes.is_empty() {
        println!("Nothing to change");
        return Ok(());
    }

    let owner = account.id.context("Stored account has no id")?;
    let profile = service
        .profiles_of(owner)
        .await?
        .into_iter()
        .next()
        .with_context(|| format!("Account {} has no profile", account))?;
    let profile_id = profile.id.context("Stored profile has no id")?;

    let updated = service.update_profile(profile_id, changes).await?;
    println!("✅ Updated profile of {} ({})", account, updated.display(&account));
    Ok(())
}
