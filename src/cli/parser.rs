use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "devx")]
#[command(about = "Developer workflow helper")]
#[command(version, long_about = "Git, agent and configuration helpers. Also available as `dx`.")]
pub struct Cli {
    #[arg(long, short = 'v', global = true, help = "Enable debug logging on stderr")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install shell completions
    Init(InitArgs),
    /// Read and write configuration
    Config(ConfigArgs),
    /// Git workflow helpers
    Git(GitArgs),
    /// Update devx to the latest release
    Update(UpdateArgs),
    /// Launch the configured coding agent
    Agent(AgentArgs),
    /// Print a shell completion script
    Completion(CompletionArgs),
}

#[derive(Args, Debug)]
pub struct InitArgs {
    #[arg(long, help = "Directory to write completion scripts to")]
    pub dir: Option<PathBuf>,

    // Detected from $SHELL when omitted
    #[arg(long, value_enum, help = "Shell whose rc file gets the hook")]
    pub shell: Option<Shell>,

    #[arg(long, help = "Do not modify the shell rc file")]
    pub no_rc: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print a configuration value
    Get {
        /// Dotted configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Dotted configuration key
        key: String,
        /// New value
        value: String,
    },
    /// Print every configuration value
    List,
    /// Print the configuration file path
    Path,
    /// Reset configuration to defaults
    Reset {
        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

#[derive(Args, Debug)]
pub struct GitArgs {
    #[command(subcommand)]
    pub command: GitCommands,
}

#[derive(Subcommand, Debug)]
pub enum GitCommands {
    /// Create a conventional commit
    Commit(CommitArgs),
    /// List branches, or create one
    Branch {
        /// Branch to create
        name: Option<String>,
    },
    /// Switch to a branch
    Checkout {
        /// Branch to check out
        branch: String,
    },
    /// Push the current branch
    Push(PushArgs),
    /// Pull the current branch
    Pull {
        #[arg(long, help = "Rebase instead of merge")]
        rebase: bool,
    },
    /// Manage worktrees
    Worktree(WorktreeArgs),
}

#[derive(Args, Debug)]
pub struct CommitArgs {
    // Falls back to commit.default_type
    #[arg(long, short = 't', value_enum, help = "Commit type")]
    pub r#type: Option<CommitType>,

    #[arg(long, short = 's', help = "Commit scope")]
    pub scope: Option<String>,

    #[arg(long, short = 'm', help = "Commit summary")]
    pub message: String,

    #[arg(long, help = "Mark as a breaking change")]
    pub breaking: bool,

    #[arg(long, short = 'a', help = "Stage tracked changes first")]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct PushArgs {
    /// Remote to push to
    pub remote: Option<String>,

    /// Extra git push arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Args, Debug)]
pub struct WorktreeArgs {
    #[command(subcommand)]
    pub command: WorktreeCommands,
}

#[derive(Subcommand, Debug)]
pub enum WorktreeCommands {
    /// Create a worktree for a branch
    Add {
        /// Branch to check out
        branch: String,
        /// Worktree location
        path: Option<PathBuf>,
    },
    /// List worktrees
    List,
    /// Remove a worktree
    Remove {
        /// Branch of the worktree
        branch: String,
        #[arg(long, short = 'f', help = "Remove even with local changes")]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[arg(long, help = "Only print what would run")]
    pub check: bool,
}

#[derive(Args, Debug)]
pub struct AgentArgs {
    /// Arguments passed to the agent
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Args, Debug)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    #[arg(
        long = "static",
        help = "Use the built-in command map instead of the live parser"
    )]
    pub use_static: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    Zsh,
    Bash,
    Fish,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Chore,
    Revert,
}

impl CommitType {
    pub fn as_str(self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Perf => "perf",
            CommitType::Test => "test",
            CommitType::Build => "build",
            CommitType::Ci => "ci",
            CommitType::Chore => "chore",
            CommitType::Revert => "revert",
        }
    }
}

impl CommitArgs {
    pub fn validate(&self) -> crate::utils::Result<()> {
        if self.message.trim().is_empty() {
            return Err(crate::utils::DevxError::invalid_args(
                "Commit message cannot be empty",
            ));
        }

        if let Some(ref scope) = self.scope {
            if scope.trim().is_empty() || scope.contains(['(', ')', ':']) {
                return Err(crate::utils::DevxError::invalid_args(format!(
                    "Invalid commit scope '{scope}'"
                )));
            }
        }

        Ok(())
    }
}

pub fn validate_branch_name(name: &str) -> crate::utils::Result<()> {
    if name.is_empty() {
        return Err(crate::utils::DevxError::invalid_args(
            "Branch name cannot be empty",
        ));
    }

    if name.starts_with('-') || name.ends_with('/') {
        return Err(crate::utils::DevxError::invalid_args(
            "Branch name cannot start with '-' or end with '/'",
        ));
    }

    if name.contains("..") || name.contains("//") || name.chars().any(char::is_whitespace) {
        return Err(crate::utils::DevxError::invalid_args(
            "Branch name contains invalid character sequence",
        ));
    }

    Ok(())
}
