//! Hand-maintained command tree used when the live clap definition is not
//! wanted, e.g. when packaging scripts ahead of time with `--static`.
//! Keep it in step with `cli::parser`.

use super::model::{ArgumentNode, CommandNode, OptionNode};
use super::registry::COMMIT_TYPES;
use crate::cli::CLI_NAME;

pub fn fallback_tree() -> CommandNode {
    CommandNode::new(CLI_NAME, "Developer workflow helper")
        .option(OptionNode::flag("verbose", "Enable debug logging on stderr").short('v'))
        .subcommand(init())
        .subcommand(config())
        .subcommand(git())
        .subcommand(
            CommandNode::new("update", "Update devx to the latest release")
                .option(OptionNode::flag("check", "Only print what would run")),
        )
        .subcommand(
            CommandNode::new("agent", "Launch the configured coding agent")
                .argument(ArgumentNode::new("args", "Arguments passed to the agent").variadic())
                .allow_unknown_option(),
        )
        .subcommand(
            CommandNode::new("completion", "Print a shell completion script")
                .option(OptionNode::flag(
                    "static",
                    "Use the built-in command map instead of the live parser",
                ))
                .argument(
                    ArgumentNode::new("shell", "Target shell")
                        .required()
                        .choices(["zsh", "bash", "fish"]),
                ),
        )
}

fn init() -> CommandNode {
    CommandNode::new("init", "Install shell completions")
        .option(OptionNode::value("dir", "Directory to write completion scripts to"))
        .option(OptionNode::value("shell", "Shell whose rc file gets the hook").choices([
            "zsh", "bash", "fish",
        ]))
        .option(OptionNode::flag("no-rc", "Do not modify the shell rc file"))
}

fn config() -> CommandNode {
    CommandNode::new("config", "Read and write configuration")
        .subcommand(
            CommandNode::new("get", "Print a configuration value")
                .argument(ArgumentNode::new("key", "Dotted configuration key").required()),
        )
        .subcommand(
            CommandNode::new("set", "Set a configuration value")
                .argument(ArgumentNode::new("key", "Dotted configuration key").required())
                .argument(ArgumentNode::new("value", "New value").required()),
        )
        .subcommand(CommandNode::new("list", "Print every configuration value"))
        .subcommand(CommandNode::new("path", "Print the configuration file path"))
        .subcommand(
            CommandNode::new("reset", "Reset configuration to defaults")
                .option(OptionNode::flag("yes", "Skip the confirmation prompt").short('y')),
        )
}

fn git() -> CommandNode {
    CommandNode::new("git", "Git workflow helpers")
        .subcommand(
            CommandNode::new("commit", "Create a conventional commit")
                .option(
                    OptionNode::value("type", "Commit type")
                        .short('t')
                        .choices(COMMIT_TYPES.iter().copied()),
                )
                .option(OptionNode::value("scope", "Commit scope").short('s'))
                .option(OptionNode::value("message", "Commit summary").short('m'))
                .option(OptionNode::flag("breaking", "Mark as a breaking change"))
                .option(OptionNode::flag("all", "Stage tracked changes first").short('a')),
        )
        .subcommand(
            CommandNode::new("branch", "List branches, or create one")
                .argument(ArgumentNode::new("name", "Branch to create")),
        )
        .subcommand(
            CommandNode::new("checkout", "Switch to a branch")
                .argument(ArgumentNode::new("branch", "Branch to check out").required()),
        )
        .subcommand(
            CommandNode::new("push", "Push the current branch")
                .argument(ArgumentNode::new("remote", "Remote to push to"))
                .argument(ArgumentNode::new("args", "Extra git push arguments").variadic())
                .allow_unknown_option(),
        )
        .subcommand(
            CommandNode::new("pull", "Pull the current branch")
                .option(OptionNode::flag("rebase", "Rebase instead of merge")),
        )
        .subcommand(
            CommandNode::new("worktree", "Manage worktrees")
                .subcommand(
                    CommandNode::new("add", "Create a worktree for a branch")
                        .argument(ArgumentNode::new("branch", "Branch to check out").required())
                        .argument(ArgumentNode::new("path", "Worktree location")),
                )
                .subcommand(CommandNode::new("list", "List worktrees"))
                .subcommand(
                    CommandNode::new("remove", "Remove a worktree")
                        .option(OptionNode::flag("force", "Remove even with local changes").short('f'))
                        .argument(ArgumentNode::new("branch", "Branch of the worktree").required()),
                ),
        )
}
