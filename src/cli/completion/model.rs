//! Intermediate representation shared by the completion generators.
//!
//! A [`CommandNode`] tree is built fresh for every generation request, either
//! by walking the live clap command or from the static fallback tree, and is
//! not modified afterwards.

use crate::utils::{DevxError, Result};
use std::collections::HashSet;

/// One command-line flag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionNode {
    /// Flag spec as declared, e.g. `-t, --type <type>`. Informational only.
    pub flags: String,
    /// Long name without leading dashes. For short-only options this is the
    /// declared id and never rendered as `--<long>`.
    pub long: String,
    pub short: Option<char>,
    /// Only `-<short>` exists on the command line.
    pub short_only: bool,
    pub description: String,
    /// Whether the value is mandatory when the flag is used.
    pub required: bool,
    /// The flag takes no value.
    pub is_boolean: bool,
    pub is_variadic: bool,
    /// Placeholder for the value; `None` for boolean flags.
    pub arg_name: Option<String>,
    /// Closed set of legal values.
    pub choices: Option<Vec<String>>,
}

impl OptionNode {
    /// A boolean flag.
    pub fn flag(long: impl Into<String>, description: impl Into<String>) -> Self {
        let long = long.into();
        Self {
            flags: format!("--{long}"),
            long,
            description: description.into(),
            is_boolean: true,
            ..Self::default()
        }
    }

    /// A flag taking a mandatory value named after the long name.
    pub fn value(long: impl Into<String>, description: impl Into<String>) -> Self {
        let long = long.into();
        Self {
            flags: format!("--{long} <{long}>"),
            arg_name: Some(long.clone()),
            long,
            description: description.into(),
            required: true,
            ..Self::default()
        }
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self.flags = format!("-{short}, {}", self.flags);
        self
    }

    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    /// Drop the long form, leaving only `-<short>`.
    pub fn short_only(mut self, short: char) -> Self {
        self.short = Some(short);
        self.short_only = true;
        self.flags = match self.arg_name {
            Some(ref name) => format!("-{short} <{name}>"),
            None => format!("-{short}"),
        };
        self
    }

    /// Mark the flag as repeatable. Generators ignore this.
    pub fn variadic(mut self) -> Self {
        self.is_variadic = true;
        self
    }

    pub fn choice_list(&self) -> Option<&[String]> {
        self.choices.as_deref().filter(|c| !c.is_empty())
    }
}

/// One positional argument.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArgumentNode {
    pub name: String,
    pub description: String,
    pub required: bool,
    /// This argument swallows every remaining word. Last argument only.
    pub variadic: bool,
    pub choices: Option<Vec<String>>,
}

impl ArgumentNode {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    pub fn choice_list(&self) -> Option<&[String]> {
        self.choices.as_deref().filter(|c| !c.is_empty())
    }
}

/// One command or subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandNode {
    pub name: String,
    pub description: String,
    pub options: Vec<OptionNode>,
    pub arguments: Vec<ArgumentNode>,
    pub subcommands: Vec<CommandNode>,
    /// Unrecognised flags are passed through, so completion must not be
    /// restricted to `options`.
    pub allow_unknown_option: bool,
}

impl CommandNode {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn option(mut self, option: OptionNode) -> Self {
        self.options.push(option);
        self
    }

    pub fn argument(mut self, argument: ArgumentNode) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn subcommand(mut self, subcommand: CommandNode) -> Self {
        self.subcommands.push(subcommand);
        self
    }

    pub fn allow_unknown_option(mut self) -> Self {
        self.allow_unknown_option = true;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.subcommands.is_empty()
    }

    /// Resolve a path of subcommand names below this node.
    pub fn find(&self, path: &[&str]) -> Option<&CommandNode> {
        path.iter().try_fold(self, |node, name| {
            node.subcommands.iter().find(|child| child.name == *name)
        })
    }

    /// Check the structural invariants the generators rely on.
    pub fn validate(&self) -> Result<()> {
        self.validate_at(&[])
    }

    fn validate_at(&self, parents: &[&str]) -> Result<()> {
        let mut path = parents.to_vec();
        path.push(&self.name);
        let location = path.join(" ");

        if self.name.is_empty() {
            return Err(DevxError::invalid_tree(format!(
                "unnamed command under '{}'",
                parents.join(" ")
            )));
        }

        let mut longs = HashSet::new();
        for option in &self.options {
            if !longs.insert(option.long.as_str()) {
                return Err(DevxError::invalid_tree(format!(
                    "duplicate option '--{}' on '{location}'",
                    option.long
                )));
            }
            if option.short_only && option.short.is_none() {
                return Err(DevxError::invalid_tree(format!(
                    "short-only option '{}' on '{location}' has no short flag",
                    option.long
                )));
            }
            if option.is_boolean == option.arg_name.is_some() {
                return Err(DevxError::invalid_tree(format!(
                    "option '--{}' on '{location}' must have a value name iff it takes a value",
                    option.long
                )));
            }
        }

        if let Some(pos) = self.arguments.iter().position(|a| a.variadic) {
            if pos + 1 != self.arguments.len() {
                return Err(DevxError::invalid_tree(format!(
                    "variadic argument '{}' on '{location}' is not the last argument",
                    self.arguments[pos].name
                )));
            }
        }

        let mut names = HashSet::new();
        for child in &self.subcommands {
            if child.name == "help" {
                return Err(DevxError::invalid_tree(format!(
                    "'help' pseudo-command under '{location}'"
                )));
            }
            if !names.insert(child.name.as_str()) {
                return Err(DevxError::invalid_tree(format!(
                    "duplicate subcommand '{}' under '{location}'",
                    child.name
                )));
            }
            child.validate_at(&path)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CommandNode {
        CommandNode::new("devx", "root")
            .option(OptionNode::flag("verbose", "Verbose output").short('v'))
            .subcommand(
                CommandNode::new("git", "Git helpers").subcommand(
                    CommandNode::new("worktree", "Worktrees")
                        .subcommand(CommandNode::new("add", "Add a worktree")),
                ),
            )
    }

    #[test]
    fn test_option_builders() {
        let flag = OptionNode::flag("verbose", "Verbose output").short('v');
        assert!(flag.is_boolean);
        assert!(flag.arg_name.is_none());
        assert_eq!(flag.flags, "-v, --verbose");

        let value = OptionNode::value("type", "Commit type")
            .short('t')
            .choices(["feat", "fix"]);
        assert!(!value.is_boolean);
        assert_eq!(value.arg_name.as_deref(), Some("type"));
        assert_eq!(value.flags, "-t, --type <type>");
        assert_eq!(
            value.choice_list(),
            Some(&["feat".to_string(), "fix".to_string()][..])
        );
    }

    #[test]
    fn test_short_only_builder() {
        let count = OptionNode::value("num", "How many").short_only('n');
        assert!(count.short_only);
        assert_eq!(count.short, Some('n'));
        assert_eq!(count.flags, "-n <num>");

        let quiet = OptionNode::flag("quiet", "").short_only('q');
        assert_eq!(quiet.flags, "-q");

        let broken = CommandNode::new("devx", "").option(OptionNode {
            short_only: true,
            ..OptionNode::flag("quiet", "")
        });
        assert!(broken.validate().is_err());
    }

    #[test]
    fn test_empty_choices_are_not_a_closed_set() {
        let arg = ArgumentNode::new("name", "").choices(Vec::<String>::new());
        assert!(arg.choice_list().is_none());
    }

    #[test]
    fn test_find_resolves_nested_paths() {
        let root = sample();
        assert_eq!(root.find(&[]).map(|n| n.name.as_str()), Some("devx"));
        assert_eq!(
            root.find(&["git", "worktree", "add"]).map(|n| n.name.as_str()),
            Some("add")
        );
        assert!(root.find(&["git", "nope"]).is_none());
        assert!(root.find(&["git", "worktree", "add"]).unwrap().is_leaf());
        assert!(!root.find(&["git"]).unwrap().is_leaf());
    }

    #[test]
    fn test_validate_accepts_well_formed_tree() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let dup_child = CommandNode::new("devx", "")
            .subcommand(CommandNode::new("list", ""))
            .subcommand(CommandNode::new("list", ""));
        assert!(dup_child.validate().is_err());

        let dup_option = CommandNode::new("devx", "")
            .option(OptionNode::flag("force", ""))
            .option(OptionNode::value("force", ""));
        assert!(dup_option.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_help_and_misplaced_variadic() {
        let with_help = CommandNode::new("devx", "").subcommand(CommandNode::new("help", ""));
        assert!(with_help.validate().is_err());

        let bad_variadic = CommandNode::new("push", "")
            .argument(ArgumentNode::new("args", "").variadic())
            .argument(ArgumentNode::new("remote", ""));
        let err = bad_variadic.validate().unwrap_err();
        assert!(err.to_string().contains("not the last argument"));
    }
}
