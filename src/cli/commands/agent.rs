use crate::cli::parser::AgentArgs;
use crate::config::Config;
use crate::utils::git::{run_program, split_command};
use crate::utils::Result;

/// Configured agent command followed by whatever was passed after `devx agent`.
pub fn agent_command_line(config: &Config, extra: Vec<String>) -> Result<(String, Vec<String>)> {
    let (program, mut args) = split_command(&config.agent.command)?;
    args.extend(extra);
    Ok((program, args))
}

pub fn execute(config: Config, args: AgentArgs) -> Result<()> {
    let (program, program_args) = agent_command_line(&config, args.args)?;
    run_program(&program, &program_args)
}
