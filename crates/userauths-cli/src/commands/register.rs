use anyhow::Result;
use clap::Args;
use userauths_application::{AccountService, NewAccount};

#[derive(Args)]
pub struct RegisterArgs {
    /// Login email
    #[arg(long)]
    email: String,
    /// Defaults to the part of the email before '@'
    #[arg(long)]
    username: Option<String>,
    /// Defaults to the part of the email before '@'
    #[arg(long)]
    full_name: Option<String>,
    #[arg(long)]
    phone: Option<String>,
}

pub async fn run(service: &AccountService, args: RegisterArgs) -> Result<()> {
    let registration = service
        .register(NewAccount {
            email: args.email,
            username: args.username,
            full_name: args.full_name,
            phone: args.phone,
        })
        .await?;

    let public_id = registration
        .profile
        .public_id
        .as_ref()
        .map(|id| id.as_str())
        .unwrap_or_default();
    println!(
        "✅ Registered {} (username: {}, profile: {})",
        registration.account, registration.account.username, public_id
    );
    Ok(())
}
