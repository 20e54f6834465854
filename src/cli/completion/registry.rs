//! Completion sources that are not plain free text: dynamic candidates
//! computed by the shell at completion time, and the static enumerations
//! emitted as literal choice lists.

use super::model::{ArgumentNode, CommandNode};

pub use crate::config::CONFIG_KEYS;

/// A named source of candidates evaluated when the user presses tab.
#[derive(Debug, PartialEq, Eq)]
pub struct DynamicCompletion {
    pub name: &'static str,
    /// Helper function name, valid in zsh, bash and fish.
    pub function: &'static str,
    /// Shell command printing one candidate per line.
    pub command: &'static str,
    pub description: &'static str,
}

pub static BRANCHES: DynamicCompletion = DynamicCompletion {
    name: "branches",
    function: "__devx_branches",
    command: "git branch --format='%(refname:short)' 2>/dev/null",
    description: "git branches",
};

pub static REMOTES: DynamicCompletion = DynamicCompletion {
    name: "remotes",
    function: "__devx_remotes",
    command: "git remote 2>/dev/null",
    description: "git remotes",
};

static DYNAMIC_COMPLETIONS: [&DynamicCompletion; 2] = [&BRANCHES, &REMOTES];

/// Conventional commit type tokens.
pub const COMMIT_TYPES: &[&str] = &[
    "feat", "fix", "docs", "style", "refactor", "perf", "test", "build", "ci", "chore", "revert",
];

/// Parent commands whose `name` argument refers to an existing branch.
const BRANCH_NAME_PARENTS: &[&str] = &["checkout", "switch", "branch", "merge", "rebase"];

/// Parent commands whose `key` argument is a configuration key.
const CONFIG_KEY_PARENTS: &[&str] = &["get", "set", "unset"];

pub fn dynamic_completions() -> &'static [&'static DynamicCompletion] {
    &DYNAMIC_COMPLETIONS
}

pub fn dynamic_completion(name: &str) -> Option<&'static DynamicCompletion> {
    DYNAMIC_COMPLETIONS
        .iter()
        .copied()
        .find(|entry| entry.name == name)
}

/// Where the candidates for a positional argument come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentSource<'a> {
    Dynamic(&'static DynamicCompletion),
    Choices(&'a [String]),
    ConfigKeys,
    /// Free text swallowing every remaining word.
    Rest,
    /// Free text at a single position.
    Positional,
}

/// Decide how `arg` of `parent` is completed.
///
/// This is the only place argument and command names are inspected; the
/// generators just render the returned source.
pub fn argument_source<'a>(arg: &'a ArgumentNode, parent: &CommandNode) -> ArgumentSource<'a> {
    let parent_name = parent.name.as_str();

    if arg.name == "branch" || (arg.name == "name" && BRANCH_NAME_PARENTS.contains(&parent_name)) {
        return ArgumentSource::Dynamic(&BRANCHES);
    }

    if arg.name == "remote" {
        return ArgumentSource::Dynamic(&REMOTES);
    }

    if let Some(choices) = arg.choice_list() {
        return ArgumentSource::Choices(choices);
    }

    if arg.name == "key" && CONFIG_KEY_PARENTS.contains(&parent_name) {
        return ArgumentSource::ConfigKeys;
    }

    if arg.variadic {
        ArgumentSource::Rest
    } else {
        ArgumentSource::Positional
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        assert_eq!(dynamic_completion("branches"), Some(&BRANCHES));
        assert_eq!(dynamic_completion("remotes"), Some(&REMOTES));
        assert_eq!(dynamic_completion("tags"), None);
        assert_eq!(dynamic_completions().len(), 2);
    }

    #[test]
    fn test_helper_names_are_shell_safe() {
        for entry in dynamic_completions() {
            assert!(entry.function.starts_with("__devx_"));
            assert!(entry
                .function
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_'));
        }
    }

    #[test]
    fn test_branch_heuristics() {
        let checkout = CommandNode::new("checkout", "");
        let init = CommandNode::new("init", "");

        let branch = ArgumentNode::new("branch", "");
        assert_eq!(
            argument_source(&branch, &init),
            ArgumentSource::Dynamic(&BRANCHES)
        );

        let name = ArgumentNode::new("name", "");
        assert_eq!(
            argument_source(&name, &checkout),
            ArgumentSource::Dynamic(&BRANCHES)
        );
        assert_eq!(argument_source(&name, &init), ArgumentSource::Positional);
    }

    #[test]
    fn test_remote_heuristic() {
        let push = CommandNode::new("push", "");
        let remote = ArgumentNode::new("remote", "");
        assert_eq!(
            argument_source(&remote, &push),
            ArgumentSource::Dynamic(&REMOTES)
        );
    }

    #[test]
    fn test_choices_and_config_keys() {
        let completion = CommandNode::new("completion", "");
        let shell = ArgumentNode::new("shell", "").choices(["bash", "zsh", "fish"]);
        assert!(matches!(
            argument_source(&shell, &completion),
            ArgumentSource::Choices(c) if c.len() == 3
        ));

        let get = CommandNode::new("get", "");
        let key = ArgumentNode::new("key", "");
        assert_eq!(argument_source(&key, &get), ArgumentSource::ConfigKeys);
        assert_eq!(
            argument_source(&key, &completion),
            ArgumentSource::Positional
        );
    }

    #[test]
    fn test_variadic_falls_back_to_rest() {
        let agent = CommandNode::new("agent", "");
        let args = ArgumentNode::new("args", "").variadic();
        assert_eq!(argument_source(&args, &agent), ArgumentSource::Rest);
    }

    #[test]
    fn test_static_enumerations() {
        assert!(COMMIT_TYPES.contains(&"feat"));
        assert!(COMMIT_TYPES.contains(&"fix"));
        assert!(CONFIG_KEYS.iter().all(|k| k.contains('.')));
    }
}
