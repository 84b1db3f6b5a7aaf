use anyhow::Result;
use userauths_infrastructure::ConfigService;

pub fn run(config_service: &ConfigService) -> Result<()> {
    if config_service.write_defaults()? {
        println!("✅ Wrote {}", config_service.path().display());
    } else {
        println!("Config already exists at {}", config_service.path().display());
    }
    Ok(())
}
