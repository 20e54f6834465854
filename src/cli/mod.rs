pub mod commands;
pub mod completion;
pub mod parser;


pub use parser::{Cli, Commands};

use crate::config::ConfigManager;
use crate::utils::{DevxError, Result};

/// Name of the installed binary.
pub const CLI_NAME: &str = "devx";
/// Short alias that shares the same completions.
pub const ALIAS_NAME: &str = "dx";

pub fn execute_command(cli: Cli) -> Result<()> {
    execute_command_with_config(cli, None)
}

pub fn execute_command_with_config(
    cli: Cli,
    test_config: Option<crate::config::Config>,
) -> Result<()> {
    let load_config = || -> Result<crate::config::Config> {
        match test_config {
            Some(cfg) => Ok(cfg),
            None => ConfigManager::load_or_create()
                .map_err(|e| DevxError::config_error(format!("Failed to load config: {e}"))),
        }
    };

    match cli.command {
        Commands::Completion(args) => commands::completion::execute(args),
        Commands::Init(args) => commands::init::execute(args),
        Commands::Config(args) => commands::config::execute(args),
        Commands::Git(args) => commands::git::execute(load_config()?, args),
        Commands::Update(args) => commands::update::execute(load_config()?, args),
        Commands::Agent(args) => commands::agent::execute(load_config()?, args),
    }
}
