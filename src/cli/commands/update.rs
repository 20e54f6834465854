use crate::cli::parser::UpdateArgs;
use crate::config::Config;
use crate::utils::git::{run_program, split_command};
use crate::utils::Result;
use tracing::info;

pub fn execute(config: Config, args: UpdateArgs) -> Result<()> {
    let (program, program_args) = split_command(&config.update.command)?;

    if args.check {
        println!("devx {}", env!("CARGO_PKG_VERSION"));
        println!("Update command: {}", config.update.command);
        return Ok(());
    }

    info!(command = %config.update.command, "updating devx");
    run_program(&program, &program_args)?;
    println!("✅ devx updated");
    Ok(())
}
