use anyhow::Result;
use userauths_application::AccountService;

use super::require_account;

pub async fn run(service: &AccountService, email: &str) -> Result<()> {
    let account = require_account(service, email).await?;

    println!("{}", account);
    println!("  username:  {}", account.username);
    println!("  full name: {}", account.full_name.as_deref().unwrap_or_default());
    if let Some(phone) = &account.phone {
        println!("  phone:     {}", phone);
    }

    let Some(id) = account.id else {
        return Ok(());
    };
    for profile in service.profiles_of(id).await? {
        let public_id = profile
            .public_id
            .as_ref()
            .map(|id| id.as_str())
            .unwrap_or_default();
        println!("  profile {}", public_id);
        println!("    name:    {}", profile.display(&account));
        println!("    image:   {}", profile.image_or_default(service.settings()));
        if let Some(created_at) = profile.created_at {
            println!("    created: {}", created_at.to_rfc3339());
        }
        for (label, value) in [
            ("about", &profile.about),
            ("gender", &profile.gender),
            ("country", &profile.country),
            ("state", &profile.state),
            ("address", &profile.address),
        ] {
            if let Some(value) = value {
                println!("    {:<8} {}", format!("{}:", label), value);
            }
        }
    }
    Ok(())
}
