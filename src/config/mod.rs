use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod defaults;
pub mod manager;
pub mod validation;

pub use manager::ConfigManager;

/// Every dotted key accepted by `devx config get/set`.
pub const CONFIG_KEYS: &[&str] = &[
    "agent.command",
    "commit.default_type",
    "commit.require_scope",
    "git.branch_prefix",
    "git.default_remote",
    "git.sign_commits",
    "update.command",
];

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub git: GitConfig,
    pub commit: CommitConfig,
    pub agent: AgentConfig,
    pub update: UpdateConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GitConfig {
    pub branch_prefix: String,
    pub default_remote: String,
    pub sign_commits: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CommitConfig {
    pub default_type: String,
    pub require_scope: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct AgentConfig {
    pub command: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct UpdateConfig {
    pub command: String,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

impl From<ConfigError> for crate::utils::DevxError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::Io(e) => Self::Io(e),
            ConfigError::Json(e) => Self::Json(e),
            ConfigError::Validation(message) => Self::Config { message },
            ConfigError::UnknownKey(key) => Self::UnknownConfigKey { key },
        }
    }
}

impl Config {
    pub fn load_or_create() -> Result<Self> {
        ConfigManager::load_or_create()
    }

    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Prefix to prepend to new branch names, `None` when unset.
    pub fn branch_prefix(&self) -> Option<&str> {
        let prefix = self.git.branch_prefix.trim_end_matches('/');
        (!prefix.is_empty()).then_some(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_prefix_trims_and_hides_empty() {
        let mut config = defaults::default_config();

        config.git.branch_prefix = "feature/".to_string();
        assert_eq!(config.branch_prefix(), Some("feature"));

        config.git.branch_prefix = String::new();
        assert_eq!(config.branch_prefix(), None);
    }

    #[test]
    fn test_config_keys_resolve_against_defaults() {
        let value = serde_json::to_value(defaults::default_config()).unwrap();
        for key in CONFIG_KEYS {
            let pointer = format!("/{}", key.replace('.', "/"));
            assert!(value.pointer(&pointer).is_some(), "missing key {key}");
        }
    }

    #[test]
    fn test_config_error_display() {
        let io_error = ConfigError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        assert_eq!(io_error.to_string(), "IO error: file not found");

        let validation_error = ConfigError::Validation("bad remote".to_string());
        assert_eq!(validation_error.to_string(), "Validation error: bad remote");
    }

    #[test]
    fn test_config_error_into_devx_error() {
        let err: crate::utils::DevxError = ConfigError::UnknownKey("git.nope".to_string()).into();
        assert!(matches!(
            err,
            crate::utils::DevxError::UnknownConfigKey { .. }
        ));
    }
}
