pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod models;

pub use config::Config;
pub use db::{Store, StoreError};

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, EmailCommands, RoleCommands};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    config.validate()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Add {
            name,
            fullname,
            nickname,
        } => cli::commands::cmd_add_user(&config, &name, fullname, nickname).await,

        Commands::List { json } => cli::commands::cmd_list_users(&config, json).await,

        Commands::Info { id } => cli::commands::cmd_user_info(&config, id).await,

        Commands::Remove { id, yes } => cli::commands::cmd_remove_user(&config, id, yes).await,

        Commands::Email { command } => match command {
            EmailCommands::Add { user_id, address } => {
                cli::commands::cmd_email_add(&config, user_id, &address).await
            }
            EmailCommands::List { user_id } => {
                cli::commands::cmd_email_list(&config, user_id).await
            }
            EmailCommands::Remove { id } => cli::commands::cmd_email_remove(&config, id).await,
        },

        Commands::Role { command } => match command {
            RoleCommands::Add {
                name,
                access_lvl,
                desc,
            } => cli::commands::cmd_role_add(&config, &name, access_lvl, desc).await,
            RoleCommands::List { json } => cli::commands::cmd_role_list(&config, json).await,
            RoleCommands::Assign { user_id, role } => {
                cli::commands::cmd_role_assign(&config, user_id, &role).await
            }
            RoleCommands::Revoke { user_id, role } => {
                cli::commands::cmd_role_revoke(&config, user_id, &role).await
            }
            RoleCommands::Members { role } => {
                cli::commands::cmd_role_members(&config, &role).await
            }
            RoleCommands::Remove { name } => cli::commands::cmd_role_remove(&config, &name).await,
        },

        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("Config file already exists.");
            }
            Ok(())
        }
    }
}
