use chrono::Local;
use dialoguer::Select;
use std::env;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::cli::completion::{CompletionService, TreeSource};
use crate::cli::parser::{InitArgs, Shell};
use crate::cli::CLI_NAME;
use crate::config::defaults::get_default_completions_dir;
use crate::utils::{DevxError, Result};

const BLOCK_START: &str = "# >>> devx completion >>>";
const BLOCK_END: &str = "# <<< devx completion <<<";

fn is_non_interactive() -> bool {
    env::var("DEVX_NON_INTERACTIVE").is_ok()
        || env::var("CI").is_ok()
        || !std::io::stdin().is_terminal()
}

pub fn execute(args: InitArgs) -> Result<()> {
    let dir = args.dir.unwrap_or_else(get_default_completions_dir);

    let root = CompletionService::tree(TreeSource::Live);
    root.validate()?;
    let written = CompletionService::write_all(&dir, &root)?;

    println!("Wrote completion scripts to {}:", dir.display());
    for path in &written {
        println!("  {}", path.display());
    }

    if args.no_rc {
        return Ok(());
    }

    let shell = match args.shell {
        Some(shell) => shell,
        None => detect_shell()?,
    };
    let rc_path = get_shell_config_path(shell)?;

    println!("\nDetected shell: {shell:?}");
    println!("Config file: {}", rc_path.display());

    if is_completion_installed(&rc_path)? {
        println!("\n✓ devx completions are already hooked into your shell.");
        println!("  If completions aren't working, try reloading your shell.");
        return Ok(());
    }

    if let Some(backup_path) = create_backup(&rc_path)? {
        println!("Created backup: {}", backup_path.display());
    }

    install_completion(&rc_path, shell, &dir)?;

    println!("\n✓ Completions installed successfully!");
    println!("\nTo activate completions, run:");
    println!("  source {}", rc_path.display());
    println!("\nOr restart your terminal.");

    Ok(())
}

fn detect_shell() -> Result<Shell> {
    if let Ok(shell_env) = env::var("SHELL") {
        if let Some(shell) = parse_shell_from_path(&shell_env) {
            return Ok(shell);
        }
        debug!(shell = %shell_env, "unrecognised $SHELL");
    }

    if is_non_interactive() {
        return Err(DevxError::config_error(
            "Cannot detect shell in non-interactive mode. Pass --shell explicitly.",
        ));
    }

    println!("Unable to detect shell automatically.");
    let selection = Select::new()
        .with_prompt("Please select your shell")
        .items(&["zsh", "bash", "fish"])
        .default(0)
        .interact()
        .map_err(|e| DevxError::config_error(format!("Failed to get shell selection: {e}")))?;

    Shell::ALL
        .get(selection)
        .copied()
        .ok_or_else(|| DevxError::invalid_args(format!("Invalid shell selection {selection}")))
}

fn parse_shell_from_path(path: &str) -> Option<Shell> {
    let shell_name = Path::new(path).file_name()?.to_str()?;
    match shell_name {
        "bash" => Some(Shell::Bash),
        "zsh" => Some(Shell::Zsh),
        "fish" => Some(Shell::Fish),
        _ => None,
    }
}

fn get_shell_config_path(shell: Shell) -> Result<PathBuf> {
    let home_path = directories::BaseDirs::new()
        .ok_or_else(|| DevxError::config_error("Unable to determine home directory"))?
        .home_dir()
        .to_path_buf();

    Ok(shell_config_path_in(&home_path, shell))
}

fn shell_config_path_in(home: &Path, shell: Shell) -> PathBuf {
    match shell {
        Shell::Bash => home.join(".bashrc"),
        Shell::Zsh => home.join(".zshrc"),
        Shell::Fish => home.join(".config").join("fish").join("config.fish"),
    }
}

fn is_completion_installed(config_path: &Path) -> Result<bool> {
    if !config_path.exists() {
        return Ok(false);
    }

    let content = fs::read_to_string(config_path)?;
    Ok(content.contains(BLOCK_START))
}

/// Copy the rc file aside before touching it. Returns `None` when there is
/// nothing to back up.
fn create_backup(config_path: &Path) -> Result<Option<PathBuf>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let file_name = config_path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| DevxError::file_not_found(config_path.display().to_string()))?;
    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    let backup_path = config_path.with_file_name(format!("{file_name}.devx-backup-{timestamp}"));

    fs::copy(config_path, &backup_path)?;
    Ok(Some(backup_path))
}

fn hook_block(shell: Shell, dir: &Path) -> String {
    let dir = dir.display();
    let body = match shell {
        Shell::Zsh => format!(
            "fpath=(\"{dir}\" $fpath)\nautoload -Uz compinit && compinit -i\n"
        ),
        Shell::Bash => {
            let script = Shell::Bash.script_file_name();
            format!("[ -f \"{dir}/{script}\" ] && source \"{dir}/{script}\"\n")
        }
        Shell::Fish => {
            let script = Shell::Fish.script_file_name();
            format!("test -f \"{dir}/{script}\"; and source \"{dir}/{script}\"\n")
        }
    };

    format!("\n{BLOCK_START}\n# Managed by `{CLI_NAME} init`\n{body}{BLOCK_END}\n")
}

fn install_completion(config_path: &Path, shell: Shell, dir: &Path) -> Result<()> {
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut content = if config_path.exists() {
        fs::read_to_string(config_path)?
    } else {
        warn!(path = %config_path.display(), "shell config does not exist, creating it");
        String::new()
    };

    content.push_str(&hook_block(shell, dir));
    fs::write(config_path, content)?;
    Ok(())
}
