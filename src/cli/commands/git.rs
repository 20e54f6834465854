use crate::cli::parser::{
    validate_branch_name, CommitArgs, GitArgs, GitCommands, PushArgs, WorktreeCommands,
};
use crate::config::Config;
use crate::utils::git::{git_output, run_git};
use crate::utils::{DevxError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn execute(config: Config, args: GitArgs) -> Result<()> {
    match args.command {
        GitCommands::Commit(commit) => execute_commit(&config, commit),
        GitCommands::Branch { name } => execute_branch(&config, name.as_deref()),
        GitCommands::Checkout { branch } => run_git(["checkout", branch.as_str()]),
        GitCommands::Push(push) => execute_push(&config, push),
        GitCommands::Pull { rebase } => {
            if rebase {
                run_git(["pull", "--rebase"])
            } else {
                run_git(["pull"])
            }
        }
        GitCommands::Worktree(worktree) => execute_worktree(worktree.command),
    }
}

/// Conventional commit header: `type(scope)!: summary`.
pub fn build_commit_message(
    kind: &str,
    scope: Option<&str>,
    breaking: bool,
    summary: &str,
) -> String {
    let mut header = kind.to_string();
    if let Some(scope) = scope {
        header.push_str(&format!("({scope})"));
    }
    if breaking {
        header.push('!');
    }
    format!("{header}: {}", summary.trim())
}

fn execute_commit(config: &Config, args: CommitArgs) -> Result<()> {
    args.validate()?;

    if config.commit.require_scope && args.scope.is_none() {
        return Err(DevxError::invalid_args(
            "A commit scope is required (commit.require_scope). Pass --scope",
        ));
    }

    let kind = args
        .r#type
        .map(|t| t.as_str())
        .unwrap_or(config.commit.default_type.as_str());
    let message = build_commit_message(kind, args.scope.as_deref(), args.breaking, &args.message);

    if args.all {
        run_git(["add", "--update"])?;
    }

    let mut git_args = vec!["commit".to_string()];
    if config.git.sign_commits {
        git_args.push("-S".to_string());
    }
    git_args.push("-m".to_string());
    git_args.push(message);
    run_git(git_args)
}

/// Branch name with the configured prefix applied.
pub fn prefixed_branch(config: &Config, name: &str) -> String {
    match config.branch_prefix() {
        Some(prefix) => format!("{prefix}/{name}"),
        None => name.to_string(),
    }
}

fn execute_branch(config: &Config, name: Option<&str>) -> Result<()> {
    let Some(name) = name else {
        return run_git(["branch", "--list"]);
    };

    validate_branch_name(name)?;
    let branch = prefixed_branch(config, name);
    run_git(["branch", branch.as_str()])?;
    println!("Created branch {branch}");
    Ok(())
}

fn execute_push(config: &Config, args: PushArgs) -> Result<()> {
    let remote = args
        .remote
        .unwrap_or_else(|| config.git.default_remote.clone());

    let mut git_args = vec!["push".to_string(), remote];
    git_args.extend(args.args);
    run_git(git_args)
}

/// `<repo>/.worktrees/<branch>`, with `/` in branch names kept as directories.
pub fn default_worktree_path(repo_root: &Path, branch: &str) -> PathBuf {
    repo_root.join(".worktrees").join(branch)
}

/// Find the worktree checked out on `branch` in `git worktree list --porcelain`
/// output.
pub fn find_worktree_path(porcelain: &str, branch: &str) -> Option<PathBuf> {
    let wanted = format!("refs/heads/{branch}");
    let mut current: Option<&str> = None;

    for line in porcelain.lines() {
        if let Some(path) = line.strip_prefix("worktree ") {
            current = Some(path);
        } else if let Some(reference) = line.strip_prefix("branch ") {
            if reference == wanted {
                return current.map(PathBuf::from);
            }
        } else if line.is_empty() {
            current = None;
        }
    }

    None
}

fn execute_worktree(command: WorktreeCommands) -> Result<()> {
    match command {
        WorktreeCommands::Add { branch, path } => {
            validate_branch_name(&branch)?;
            let path = match path {
                Some(path) => path,
                None => {
                    let root = git_output(&["rev-parse", "--show-toplevel"], None)?;
                    default_worktree_path(Path::new(&root), &branch)
                }
            };
            debug!(branch = %branch, path = %path.display(), "adding worktree");

            let path_arg = path.to_string_lossy().to_string();
            run_git(["worktree", "add", path_arg.as_str(), branch.as_str()])?;
            println!("Worktree for {branch} at {}", path.display());
            Ok(())
        }
        WorktreeCommands::List => run_git(["worktree", "list"]),
        WorktreeCommands::Remove { branch, force } => {
            let porcelain = git_output(&["worktree", "list", "--porcelain"], None)?;
            let path = find_worktree_path(&porcelain, &branch).ok_or_else(|| {
                DevxError::git_operation(format!("No worktree is checked out on '{branch}'"))
            })?;

            let mut git_args = vec!["worktree".to_string(), "remove".to_string()];
            if force {
                git_args.push("--force".to_string());
            }
            git_args.push(path.to_string_lossy().to_string());
            run_git(git_args)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::default_config;

    #[test]
    fn test_build_commit_message() {
        assert_eq!(
            build_commit_message("feat", None, false, "add login"),
            "feat: add login"
        );
        assert_eq!(
            build_commit_message("fix", Some("api"), false, "  handle 404  "),
            "fix(api): handle 404"
        );
        assert_eq!(
            build_commit_message("refactor", Some("core"), true, "drop v1 config"),
            "refactor(core)!: drop v1 config"
        );
        assert_eq!(
            build_commit_message("chore", None, true, "bump msrv"),
            "chore!: bump msrv"
        );
    }

    #[test]
    fn test_prefixed_branch() {
        let mut config = default_config();
        assert_eq!(prefixed_branch(&config, "login"), "login");

        config.git.branch_prefix = "alice/".to_string();
        assert_eq!(prefixed_branch(&config, "login"), "alice/login");
    }

    #[test]
    fn test_default_worktree_path() {
        assert_eq!(
            default_worktree_path(Path::new("/repo"), "feature/login"),
            PathBuf::from("/repo/.worktrees/feature/login")
        );
    }

    #[test]
    fn test_find_worktree_path() {
        let porcelain = "worktree /repo\nHEAD 1111\nbranch refs/heads/main\n\n\
                         worktree /repo/.worktrees/login\nHEAD 2222\nbranch refs/heads/login\n\n\
                         worktree /tmp/detached\nHEAD 3333\ndetached\n";

        assert_eq!(
            find_worktree_path(porcelain, "login"),
            Some(PathBuf::from("/repo/.worktrees/login"))
        );
        assert_eq!(find_worktree_path(porcelain, "main"), Some(PathBuf::from("/repo")));
        assert_eq!(find_worktree_path(porcelain, "missing"), None);
    }

    #[test]
    fn test_commit_requires_scope_when_configured() {
        let mut config = default_config();
        config.commit.require_scope = true;

        let args = CommitArgs {
            r#type: None,
            scope: None,
            message: "add login".to_string(),
            breaking: false,
            all: false,
        };

        let result = execute_commit(&config, args);
        assert!(matches!(result, Err(DevxError::InvalidArgs { .. })));
    }
}
