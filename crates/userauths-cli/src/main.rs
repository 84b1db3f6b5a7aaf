use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use userauths_infrastructure::ConfigService;

mod bootstrap;
mod commands;

#[derive(Parser)]
#[command(name = "userauths")]
#[command(about = "userauths - accounts and public profiles", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Store file, overriding `storage.data_file`
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and its profile
    Register(commands::register::RegisterArgs),
    /// Show an account and its profiles
    Show {
        /// Login email of the account
        email: String,
    },
    /// Edit the first profile of an account
    Profile(commands::profile::ProfileArgs),
    /// List every account
    List,
    /// Delete an account and all of its profiles
    Delete {
        /// Login email of the account
        email: String,
    },
    /// Write the default configuration file
    InitConfig,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Register(_) => "register",
            Commands::Show { .. } => "show",
            Commands::Profile(_) => "profile",
            Commands::List => "list",
            Commands::Delete { .. } => "delete",
            Commands::InitConfig => "init-config",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_service = bootstrap::config_service(cli.config)?;

    match cli.command {
        Commands::InitConfig => commands::init_config::run(&config_service),
        command => run(command, &config_service, cli.data_file).await,
    }
}

async fn run(
    command: Commands,
    config_service: &ConfigService,
    data_file: Option<PathBuf>,
) -> Result<()> {
    let config = config_service.get_config()?;
    bootstrap::init_tracing(&config)?;
    let service = bootstrap::account_service(&config, data_file)?;

    tracing::debug!("Running {} (config {:?})", command.name(), config_service.path());
    match command {
        Commands::Register(args) => commands::register::run(&service, args).await,
        Commands::Show { email } => commands::show::run(&service, &email).await,
        Commands::Profile(args) => commands::profile::run(&service, args).await,
        Commands::List => commands::list::run(&service).await,
        Commands::Delete { email } => commands::delete::run(&service, &email).await,
        Commands::InitConfig => commands::init_config::run(config_service),
    }
}
