use crate::cli::completion::{CompletionService, TreeSource};
use crate::cli::parser::CompletionArgs;
use crate::utils::Result;

pub fn execute(args: CompletionArgs) -> Result<()> {
    let source = if args.use_static {
        TreeSource::Fallback
    } else {
        TreeSource::Live
    };

    let root = CompletionService::tree(source);
    root.validate()?;

    print!("{}", CompletionService::generate(&root, args.shell));
    Ok(())
}
