use crate::utils::{DevxError, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Run `git` with the given arguments, inheriting the terminal so the user
/// sees git's own output and prompts.
pub fn run_git<I, S>(args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
    debug!(?args, "running git");

    let status = Command::new("git")
        .args(&args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| DevxError::git_operation(format!("Failed to run git command: {e}")))?;

    if !status.success() {
        return Err(DevxError::git_operation(format!(
            "git {} exited with status {}",
            args.join(" "),
            status.code().unwrap_or(-1)
        )));
    }

    Ok(())
}

/// Run `git` and capture its trimmed standard output.
pub fn git_output(args: &[&str], dir: Option<&Path>) -> Result<String> {
    let mut cmd = Command::new("git");
    cmd.args(args);

    if let Some(d) = dir {
        cmd.current_dir(d);
    }

    let output = cmd
        .output()
        .map_err(|e| DevxError::git_operation(format!("Failed to run git command: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DevxError::git_operation(format!(
            "Git command failed: {}",
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8(output.stdout)
        .map_err(|e| DevxError::git_operation(format!("Invalid git output: {e}")))?;

    Ok(stdout.trim().to_string())
}

/// Run an arbitrary program (agent launchers, update commands) with
/// inherited stdio.
pub fn run_program(program: &str, args: &[String]) -> Result<()> {
    let rendered = std::iter::once(program.to_string())
        .chain(args.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ");
    debug!(command = %rendered, "running program");

    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|e| DevxError::process(&rendered, e.to_string()))?;

    if !status.success() {
        return Err(DevxError::process(
            &rendered,
            format!("exited with status {}", status.code().unwrap_or(-1)),
        ));
    }

    Ok(())
}

/// Split a configured command line into program and arguments.
pub fn split_command(command_line: &str) -> Result<(String, Vec<String>)> {
    let mut parts = shlex::split(command_line).ok_or_else(|| {
        DevxError::config_error(format!("Cannot parse command line: {command_line}"))
    })?;

    if parts.is_empty() {
        return Err(DevxError::config_error("Command line is empty"));
    }

    let program = parts.remove(0);
    Ok((program, parts))
}
