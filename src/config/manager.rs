use super::defaults::{default_config, get_config_file_path};
use super::{Config, ConfigError, Result, CONFIG_KEYS};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

pub struct ConfigManager;

impl ConfigManager {
    pub fn get_config_path() -> String {
        get_config_file_path().to_string_lossy().to_string()
    }

    pub fn load_or_create() -> Result<Config> {
        Self::load_or_create_with_path(None)
    }

    pub fn load_or_create_with_path(config_path: Option<&Path>) -> Result<Config> {
        let config_path = match config_path {
            Some(path) => path.to_path_buf(),
            None => get_config_file_path(),
        };

        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else {
            debug!(path = %config_path.display(), "creating default configuration");
            let config = default_config();
            Self::save_to_path(&config, &config_path)?;
            Ok(config)
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(config: &Config) -> Result<()> {
        Self::save_to_path(config, &get_config_file_path())
    }

    pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
        config.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(config)?;
        let mut file = fs::File::create(path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        Ok(())
    }

    /// Read a dotted key such as `git.default_remote`.
    pub fn get_value(config: &Config, key: &str) -> Result<Value> {
        let pointer = key_pointer(key)?;
        let value = serde_json::to_value(config)?;

        value
            .pointer(&pointer)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))
    }

    /// Return a copy of `config` with `key` set from its string form. The raw
    /// value is coerced to the type the key already holds.
    pub fn set_value(config: &Config, key: &str, raw: &str) -> Result<Config> {
        let pointer = key_pointer(key)?;
        let mut value = serde_json::to_value(config)?;

        let slot = value
            .pointer_mut(&pointer)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        *slot = coerce_value(key, slot, raw)?;

        let updated: Config = serde_json::from_value(value)?;
        updated.validate()?;
        Ok(updated)
    }
}

fn key_pointer(key: &str) -> Result<String> {
    if !CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey(key.to_string()));
    }
    Ok(format!("/{}", key.replace('.', "/")))
}

fn coerce_value(key: &str, current: &Value, raw: &str) -> Result<Value> {
    match current {
        Value::Bool(_) => match raw {
            "true" | "yes" | "on" | "1" => Ok(Value::Bool(true)),
            "false" | "no" | "off" | "0" => Ok(Value::Bool(false)),
            _ => Err(ConfigError::Validation(format!(
                "{key} expects a boolean, got '{raw}'"
            ))),
        },
        _ => Ok(Value::String(raw.to_string())),
    }
}
