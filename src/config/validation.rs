use super::{Config, ConfigError, Result};
use crate::cli::completion::registry::COMMIT_TYPES;

pub fn validate_config(config: &Config) -> Result<()> {
    validate_git_config(&config.git)?;
    validate_commit_config(&config.commit)?;
    validate_command("agent.command", &config.agent.command)?;
    validate_command("update.command", &config.update.command)?;
    Ok(())
}

pub fn validate_git_config(git: &super::GitConfig) -> Result<()> {
    if git.default_remote.trim().is_empty() {
        return Err(ConfigError::Validation(
            "Default remote cannot be empty".to_string(),
        ));
    }

    if git.default_remote.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "Invalid remote name '{}'. Remote names cannot contain whitespace",
            git.default_remote
        )));
    }

    if git.branch_prefix.contains("..") || git.branch_prefix.starts_with('-') {
        return Err(ConfigError::Validation(format!(
            "Invalid branch prefix '{}'",
            git.branch_prefix
        )));
    }

    Ok(())
}

pub fn validate_commit_config(commit: &super::CommitConfig) -> Result<()> {
    if !COMMIT_TYPES.contains(&commit.default_type.as_str()) {
        return Err(ConfigError::Validation(format!(
            "Invalid default commit type '{}'. Expected one of: {}",
            commit.default_type,
            COMMIT_TYPES.join(", ")
        )));
    }

    Ok(())
}

fn validate_command(key: &str, command: &str) -> Result<()> {
    if command.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{key} cannot be empty")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::default_config;

    #[test]
    fn test_rejects_unknown_commit_type() {
        let mut config = default_config();
        config.commit.default_type = "feature".to_string();

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("Invalid default commit type 'feature'"));
    }

    #[test]
    fn test_rejects_empty_commands() {
        let mut config = default_config();
        config.agent.command = "  ".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Validation(msg)) if msg.contains("agent.command")
        ));
    }

    #[test]
    fn test_rejects_bad_remote_and_prefix() {
        let mut config = default_config();
        config.git.default_remote = "my remote".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = default_config();
        config.git.branch_prefix = "../escape".to_string();
        assert!(validate_config(&config).is_err());
    }
}
