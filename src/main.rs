use clap::Parser;
use devx::cli::{execute_command, Cli};
use tracing_subscriber::filter::LevelFilter;

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = execute_command(cli) {
        eprintln!("devx: {e}");
        std::process::exit(1);
    }
}
