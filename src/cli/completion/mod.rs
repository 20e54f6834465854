pub mod fallback;
pub mod generators;
pub mod model;
pub mod registry;
pub mod service;
pub mod walker;


pub use fallback::fallback_tree;
pub use generators::{BashGenerator, FishGenerator, ShellGenerator, ZshGenerator};
pub use model::{ArgumentNode, CommandNode, OptionNode};
pub use registry::{ArgumentSource, DynamicCompletion};
pub use service::{CompletionService, TreeSource};
