use super::{AgentConfig, CommitConfig, Config, GitConfig, UpdateConfig};
use std::path::PathBuf;

pub fn default_config() -> Config {
    Config {
        git: default_git_config(),
        commit: default_commit_config(),
        agent: default_agent_config(),
        update: default_update_config(),
    }
}

pub fn default_git_config() -> GitConfig {
    GitConfig {
        branch_prefix: String::new(),
        default_remote: "origin".to_string(),
        sign_commits: false,
    }
}

pub fn default_commit_config() -> CommitConfig {
    CommitConfig {
        default_type: "feat".to_string(),
        require_scope: false,
    }
}

pub fn default_agent_config() -> AgentConfig {
    AgentConfig {
        command: "claude".to_string(),
    }
}

pub fn default_update_config() -> UpdateConfig {
    UpdateConfig {
        command: "cargo install devx --locked --force".to_string(),
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "devx")
}

fn home_fallback() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn get_default_config_dir() -> PathBuf {
    match project_dirs() {
        Some(proj_dirs) => proj_dirs.config_dir().to_path_buf(),
        None => home_fallback().join(".config").join("devx"),
    }
}

/// Directory `devx init` writes completion scripts to when `--dir` is not given.
pub fn get_default_completions_dir() -> PathBuf {
    match project_dirs() {
        Some(proj_dirs) => proj_dirs.data_dir().join("completions"),
        None => home_fallback()
            .join(".local")
            .join("share")
            .join("devx")
            .join("completions"),
    }
}

pub fn get_config_file_path() -> PathBuf {
    // Environment override, used by tests and wrapper scripts
    if let Ok(config_path) = std::env::var("DEVX_CONFIG_PATH") {
        return PathBuf::from(config_path);
    }

    get_default_config_dir().join("config.json")
}
