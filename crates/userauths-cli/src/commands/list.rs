use anyhow::Result;
use userauths_application::AccountService;

pub async fn run(service: &AccountService) -> Result<()> {
    let accounts = service.list_accounts().await?;
    if accounts.is_empty() {
        println!("No accounts");
        return Ok(());
    }

    for account in accounts {
        println!("{} ({})", account, account.username);
    }
    Ok(())
}
