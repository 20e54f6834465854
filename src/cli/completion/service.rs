use super::fallback::fallback_tree;
use super::generators::{BashGenerator, FishGenerator, ShellGenerator, ZshGenerator};
use super::model::CommandNode;
use super::walker;
use crate::cli::parser::{Cli, Shell};
use crate::cli::{ALIAS_NAME, CLI_NAME};
use crate::utils::Result;
use clap::CommandFactory;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where the command tree handed to the generators comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeSource {
    /// Walk the clap definition of this binary.
    Live,
    /// Use the hand-maintained tree in `fallback.rs`.
    Fallback,
}

impl Shell {
    /// Order scripts are generated and written in.
    pub const ALL: [Shell; 3] = [Shell::Zsh, Shell::Bash, Shell::Fish];

    pub fn script_file_name(self) -> String {
        match self {
            Shell::Zsh => format!("_{CLI_NAME}"),
            Shell::Bash => format!("{CLI_NAME}.bash"),
            Shell::Fish => format!("{CLI_NAME}.fish"),
        }
    }
}

pub struct CompletionService;

impl CompletionService {
    pub fn tree(source: TreeSource) -> CommandNode {
        match source {
            TreeSource::Live => Self::live_tree(),
            TreeSource::Fallback => fallback_tree(),
        }
    }

    pub fn live_tree() -> CommandNode {
        walker::walk(&Cli::command())
    }

    pub fn generate(root: &CommandNode, shell: Shell) -> String {
        debug!(?shell, root = %root.name, "generating completion script");
        match shell {
            Shell::Zsh => ZshGenerator.generate(root),
            Shell::Bash => BashGenerator.generate(root),
            Shell::Fish => FishGenerator.generate(root),
        }
    }

    /// zsh only resolves `#compdef` names from file names, so the alias gets
    /// its own file delegating to the primary function.
    pub fn alias_script() -> String {
        format!("#compdef {ALIAS_NAME}\n_{CLI_NAME} \"$@\"\n")
    }

    /// Write every script into `dir`, creating it when missing.
    ///
    /// Files are written one after another; the first failure is returned as
    /// is and files written before it stay on disk.
    pub fn write_all(dir: &Path, root: &CommandNode) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(Shell::ALL.len() + 1);
        for shell in Shell::ALL {
            let path = dir.join(shell.script_file_name());
            fs::write(&path, Self::generate(root, shell))?;
            info!(path = %path.display(), "wrote completion script");
            written.push(path);
        }

        let alias_path = dir.join(format!("_{ALIAS_NAME}"));
        fs::write(&alias_path, Self::alias_script())?;
        info!(path = %alias_path.display(), "wrote alias completion");
        written.push(alias_path);

        Ok(written)
    }
}
