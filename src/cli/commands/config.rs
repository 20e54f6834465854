use crate::cli::parser::{ConfigArgs, ConfigCommands};
use crate::config::defaults::default_config;
use crate::config::{ConfigManager, CONFIG_KEYS};
use crate::utils::{DevxError, Result};
use serde_json::Value;
use std::io::IsTerminal;

pub fn execute(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Get { key } => execute_get(&key),
        ConfigCommands::Set { key, value } => execute_set(&key, &value),
        ConfigCommands::List => execute_list(),
        ConfigCommands::Path => execute_path(),
        ConfigCommands::Reset { yes } => execute_reset(yes),
    }
}

/// Strings print bare so `devx config get` composes in shell scripts.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn execute_get(key: &str) -> Result<()> {
    let config = ConfigManager::load_or_create()?;
    let value = ConfigManager::get_value(&config, key)?;
    println!("{}", render_value(&value));
    Ok(())
}

fn execute_set(key: &str, value: &str) -> Result<()> {
    let config = ConfigManager::load_or_create()?;
    let updated = ConfigManager::set_value(&config, key, value)?;
    ConfigManager::save(&updated)?;
    println!("✅ Set {key} = {value}");
    Ok(())
}

fn execute_list() -> Result<()> {
    let config = ConfigManager::load_or_create()?;
    for line in list_lines(&config)? {
        println!("{line}");
    }
    Ok(())
}

fn list_lines(config: &crate::config::Config) -> Result<Vec<String>> {
    CONFIG_KEYS
        .iter()
        .map(|key| {
            let value = ConfigManager::get_value(config, key)?;
            Ok(format!("{key} = {}", render_value(&value)))
        })
        .collect()
}

fn execute_path() -> Result<()> {
    println!("{}", ConfigManager::get_config_path());
    Ok(())
}

fn is_non_interactive() -> bool {
    std::env::var("DEVX_NON_INTERACTIVE").is_ok()
        || std::env::var("CI").is_ok()
        || !std::io::stdin().is_terminal()
}

fn execute_reset(yes: bool) -> Result<()> {
    use dialoguer::{theme::ColorfulTheme, Confirm};

    if !yes {
        if is_non_interactive() {
            return Err(DevxError::invalid_args(
                "Cannot reset configuration in non-interactive mode. Pass --yes to confirm.",
            ));
        }

        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Reset configuration to defaults?")
            .default(false)
            .interact()
            .map_err(|e| DevxError::config_error(format!("Failed to read confirmation: {e}")))?;

        if !confirmed {
            println!("Reset cancelled");
            return Ok(());
        }
    }

    ConfigManager::save(&default_config())?;
    println!("✅ Configuration reset to defaults");
    Ok(())
}
