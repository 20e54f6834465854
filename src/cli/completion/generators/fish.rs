use super::{single_line, ShellGenerator};
use crate::cli::completion::model::{CommandNode, OptionNode};
use crate::cli::completion::registry::{
    argument_source, dynamic_completions, ArgumentSource, CONFIG_KEYS,
};
use crate::cli::{ALIAS_NAME, CLI_NAME};

pub struct FishGenerator;

const NO_SUBCOMMAND: &str = "__fish_use_subcommand";

impl ShellGenerator for FishGenerator {
    fn generate(&self, root: &CommandNode) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "# fish completion for {CLI_NAME}. Generated by `{CLI_NAME} completion fish`, do not edit.\n\n"
        ));

        for entry in dynamic_completions() {
            out.push_str(&format!("function {}\n", entry.function));
            out.push_str(&format!("    {}\n", entry.command));
            out.push_str("end\n\n");
        }

        out.push_str(&format!("complete -c {CLI_NAME} -e\n\n"));

        out.push_str(&format!("# {CLI_NAME}\n"));
        write_node_rules(&mut out, root, NO_SUBCOMMAND);
        write_subcommands(&mut out, root, &[]);

        out.push_str(&format!("complete -c {ALIAS_NAME} --wraps {CLI_NAME}\n"));
        out
    }
}

/// Inside single quotes fish only treats `\` and `'` specially. Output is a
/// single line.
pub fn escape_single_quotes(text: &str) -> String {
    single_line(text)
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
}

fn seen_chain(path: &[&str]) -> String {
    path.iter()
        .map(|name| format!("__fish_seen_subcommand_from {name}"))
        .collect::<Vec<_>>()
        .join("; and ")
}

fn rule_prefix(node: &CommandNode, condition: &str) -> String {
    let no_files = if node.allow_unknown_option { "" } else { " -f" };
    format!(
        "complete -c {CLI_NAME}{no_files} -n '{}'",
        escape_single_quotes(condition)
    )
}

fn option_rule(node: &CommandNode, condition: &str, option: &OptionNode) -> String {
    let mut rule = rule_prefix(node, condition);

    if let Some(short) = option.short {
        rule.push_str(&format!(" -s {short}"));
    }
    if !option.short_only {
        rule.push_str(&format!(" -l {}", option.long));
    }

    if !option.is_boolean {
        match option.choice_list() {
            Some(choices) => rule.push_str(&format!(
                " -x -a '{}'",
                escape_single_quotes(&choices.join(" "))
            )),
            None => rule.push_str(" -r"),
        }
    }

    if !option.description.is_empty() {
        rule.push_str(&format!(" -d '{}'", escape_single_quotes(&option.description)));
    }
    rule
}

/// Options of `node`, plus its positional arguments when it is a leaf.
fn write_node_rules(out: &mut String, node: &CommandNode, condition: &str) {
    for option in &node.options {
        out.push_str(&option_rule(node, condition, option));
        out.push('\n');
    }

    if !node.is_leaf() {
        return;
    }

    for arg in &node.arguments {
        let (candidates, fallback_description) = match argument_source(arg, node) {
            ArgumentSource::Dynamic(entry) => (format!("({})", entry.function), entry.description),
            ArgumentSource::Choices(choices) => (choices.join(" "), ""),
            ArgumentSource::ConfigKeys => (CONFIG_KEYS.join(" "), "configuration key"),
            ArgumentSource::Rest | ArgumentSource::Positional => continue,
        };

        let description = if arg.description.is_empty() {
            fallback_description
        } else {
            arg.description.as_str()
        };

        let mut rule = rule_prefix(node, condition);
        rule.push_str(&format!(" -a '{}'", escape_single_quotes(&candidates)));
        if !description.is_empty() {
            rule.push_str(&format!(" -d '{}'", escape_single_quotes(description)));
        }
        out.push_str(&rule);
        out.push('\n');
    }
}

fn write_subcommands(out: &mut String, node: &CommandNode, path: &[&str]) {
    let condition = if path.is_empty() {
        NO_SUBCOMMAND.to_string()
    } else {
        seen_chain(path)
    };

    for child in &node.subcommands {
        let mut rule = rule_prefix(node, &condition);
        rule.push_str(&format!(" -a '{}'", escape_single_quotes(&child.name)));
        if !child.description.is_empty() {
            rule.push_str(&format!(" -d '{}'", escape_single_quotes(&child.description)));
        }
        out.push_str(&rule);
        out.push('\n');
    }
    out.push('\n');

    for child in &node.subcommands {
        let mut child_path = path.to_vec();
        child_path.push(&child.name);

        out.push_str(&format!("# {CLI_NAME} {}\n", child_path.join(" ")));
        write_node_rules(out, child, &seen_chain(&child_path));

        if child.is_leaf() {
            out.push('\n');
        } else {
            write_subcommands(out, child, &child_path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::completion::model::ArgumentNode;

    fn render(root: &CommandNode) -> String {
        FishGenerator.generate(root)
    }

    #[test]
    fn test_escape_single_quotes() {
        assert_eq!(escape_single_quotes("it's"), "it\\'s");
        assert_eq!(escape_single_quotes("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_escape_single_quotes_keeps_one_line() {
        assert_eq!(escape_single_quotes("Don't\n\tstop"), "Don\\'t stop");
    }

    #[test]
    fn test_short_only_option_has_no_long_name() {
        let root = CommandNode::new("devx", "").subcommand(
            CommandNode::new("log", "").option(OptionNode::value("num", "").short_only('n')),
        );
        let script = render(&root);
        assert!(script.contains("-n '__fish_seen_subcommand_from log' -s n -r\n"));
        assert!(!script.contains("-l num"));
    }

    #[test]
    fn test_seen_chain() {
        assert_eq!(
            seen_chain(&["git", "worktree"]),
            "__fish_seen_subcommand_from git; and __fish_seen_subcommand_from worktree"
        );
    }

    #[test]
    fn test_clear_wrap_and_helpers() {
        let script = render(&CommandNode::new("devx", ""));
        assert!(script.contains("complete -c devx -e\n"));
        assert!(script.ends_with("complete -c dx --wraps devx\n"));
        assert!(script.contains("function __devx_branches\n"));
        assert!(script.contains("function __devx_remotes\n"));
    }

    #[test]
    fn test_root_options_and_subcommands_need_no_subcommand() {
        let root = CommandNode::new("devx", "")
            .option(OptionNode::flag("verbose", "Debug logs").short('v'))
            .subcommand(CommandNode::new("init", "Install completions"));
        let script = render(&root);
        assert!(script.contains(
            "complete -c devx -f -n '__fish_use_subcommand' -s v -l verbose -d 'Debug logs'\n"
        ));
        assert!(script.contains(
            "complete -c devx -f -n '__fish_use_subcommand' -a 'init' -d 'Install completions'\n"
        ));
    }

    #[test]
    fn test_nested_options_use_ancestor_chain() {
        let root = CommandNode::new("devx", "").subcommand(
            CommandNode::new("git", "").subcommand(
                CommandNode::new("commit", "")
                    .option(OptionNode::value("type", "Commit type").short('t').choices(["feat", "fix"]))
                    .option(OptionNode::value("message", "")),
            ),
        );
        let script = render(&root);
        assert!(script.contains(
            "complete -c devx -f -n '__fish_seen_subcommand_from git' -a 'commit'\n"
        ));
        assert!(script.contains(
            "-n '__fish_seen_subcommand_from git; and __fish_seen_subcommand_from commit' -s t -l type -x -a 'feat fix' -d 'Commit type'"
        ));
        assert!(script.contains("-l message -r\n"));
    }

    #[test]
    fn test_leaf_arguments_use_sources() {
        let root = CommandNode::new("devx", "")
            .subcommand(
                CommandNode::new("checkout", "")
                    .argument(ArgumentNode::new("branch", "Branch to check out").required()),
            )
            .subcommand(
                CommandNode::new("agent", "")
                    .argument(ArgumentNode::new("args", "").variadic())
                    .allow_unknown_option(),
            );
        let script = render(&root);
        assert!(script.contains(
            "complete -c devx -f -n '__fish_seen_subcommand_from checkout' -a '(__devx_branches)' -d 'Branch to check out'\n"
        ));
        assert!(!script.contains("__fish_seen_subcommand_from agent' -a"));
    }
}
