pub mod cli;
pub mod config;
pub mod utils;

pub use cli::completion::{CommandNode, CompletionService, TreeSource};
pub use config::Config;
pub use utils::{DevxError, Result};
