//! Bash completion is positional: the dispatcher looks at `COMP_WORDS[1]` and
//! `COMP_WORDS[2]` only. Anything nested deeper is completed from the union
//! of the depth-2 node's children and flags.

use super::{identifier, single_line, ShellGenerator};
use crate::cli::completion::model::CommandNode;
use crate::cli::completion::registry::{dynamic_completions, COMMIT_TYPES};
use crate::cli::{ALIAS_NAME, CLI_NAME};

pub struct BashGenerator;

const INDENT: &str = "    ";

impl ShellGenerator for BashGenerator {
    fn generate(&self, root: &CommandNode) -> String {
        let function = format!("_{}", identifier(CLI_NAME));
        let mut out = String::new();

        out.push_str(&format!(
            "# bash completion for {CLI_NAME}. Generated by `{CLI_NAME} completion bash`, do not edit.\n\n"
        ));

        // Printed candidates only; the dispatcher below does not call these.
        for entry in dynamic_completions() {
            out.push_str(&format!("{}() {{\n", entry.function));
            out.push_str(&format!("{INDENT}{}\n", entry.command));
            out.push_str("}\n\n");
        }

        out.push_str(&format!("{function}() {{\n"));
        line(&mut out, 1, "local cur prev");
        line(&mut out, 1, "COMPREPLY=()");
        line(&mut out, 1, "cur=\"${COMP_WORDS[COMP_CWORD]}\"");
        line(&mut out, 1, "prev=\"${COMP_WORDS[COMP_CWORD-1]}\"");
        out.push('\n');

        line(&mut out, 1, "if [[ ${COMP_CWORD} -eq 1 ]]; then");
        reply(&mut out, 2, &branch_words(root));
        line(&mut out, 2, "return 0");
        line(&mut out, 1, "fi");
        out.push('\n');

        line(&mut out, 1, "case \"${COMP_WORDS[1]}\" in");
        for child in &root.subcommands {
            line(&mut out, 2, &format!("{})", escape_double_quoted(&child.name)));
            if child.is_leaf() {
                write_leaf(&mut out, 3, root, child);
            } else {
                write_depth_one_branch(&mut out, child);
            }
            line(&mut out, 3, ";;");
        }
        line(&mut out, 1, "esac");
        out.push_str("}\n\n");

        out.push_str(&format!("complete -F {function} {CLI_NAME} {ALIAS_NAME}\n"));
        out
    }
}

/// Escape for use inside a double-quoted word list. Output is a single line.
pub fn escape_double_quoted(text: &str) -> String {
    let text = single_line(text);
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn line(out: &mut String, depth: usize, text: &str) {
    out.push_str(&INDENT.repeat(depth));
    out.push_str(text);
    out.push('\n');
}

fn reply(out: &mut String, depth: usize, words: &[String]) {
    let words = words
        .iter()
        .map(|w| escape_double_quoted(w))
        .collect::<Vec<_>>()
        .join(" ");
    line(
        out,
        depth,
        &format!("COMPREPLY=( $(compgen -W \"{words}\" -- \"${{cur}}\") )"),
    );
}

fn flag_words(node: &CommandNode) -> Vec<String> {
    let mut words = Vec::new();
    for option in &node.options {
        if !option.short_only {
            words.push(format!("--{}", option.long));
        }
        if let Some(short) = option.short {
            words.push(format!("-{short}"));
        }
    }
    words
}

fn branch_words(node: &CommandNode) -> Vec<String> {
    node.subcommands
        .iter()
        .map(|child| child.name.clone())
        .chain(flag_words(node))
        .collect()
}

fn prev_matches(option_long: Option<&str>, short: Option<char>) -> String {
    let tests: Vec<String> = option_long
        .map(|long| format!("--{long}"))
        .into_iter()
        .chain(short.map(|s| format!("-{s}")))
        .map(|word| format!("\"${{prev}}\" == \"{word}\""))
        .collect();
    format!("if [[ {} ]]; then", tests.join(" || "))
}

fn is_commit_under_git(parent: &CommandNode, node: &CommandNode) -> bool {
    parent.name == "git" && node.name == "commit"
}

fn write_leaf(out: &mut String, depth: usize, parent: &CommandNode, node: &CommandNode) {
    if is_commit_under_git(parent, node) {
        line(out, depth, &prev_matches(Some("type"), Some('t')));
        let types: Vec<String> = COMMIT_TYPES.iter().map(|t| t.to_string()).collect();
        reply(out, depth + 1, &types);
        line(out, depth + 1, "return 0");
        line(out, depth, "fi");
    }

    for option in &node.options {
        if is_commit_under_git(parent, node) && option.long == "type" {
            continue;
        }
        if let Some(choices) = option.choice_list() {
            let long = (!option.short_only).then_some(option.long.as_str());
            line(out, depth, &prev_matches(long, option.short));
            reply(out, depth + 1, choices);
            line(out, depth + 1, "return 0");
            line(out, depth, "fi");
        }
    }

    reply(out, depth, &flag_words(node));
    if node.allow_unknown_option {
        line(out, depth, "COMPREPLY+=( $(compgen -f -- \"${cur}\") )");
    }
    line(out, depth, "return 0");
}

fn write_depth_one_branch(out: &mut String, node: &CommandNode) {
    line(out, 3, "if [[ ${COMP_CWORD} -eq 2 ]]; then");
    reply(out, 4, &branch_words(node));
    line(out, 4, "return 0");
    line(out, 3, "fi");
    line(out, 3, "case \"${COMP_WORDS[2]}\" in");
    for child in &node.subcommands {
        line(out, 4, &format!("{})", escape_double_quoted(&child.name)));
        if child.is_leaf() {
            write_leaf(out, 5, node, child);
        } else {
            reply(out, 5, &branch_words(child));
            line(out, 5, "return 0");
        }
        line(out, 5, ";;");
    }
    line(out, 3, "esac");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::completion::model::OptionNode;

    fn git_tree() -> CommandNode {
        CommandNode::new("devx", "")
            .option(OptionNode::flag("verbose", "").short('v'))
            .subcommand(
                CommandNode::new("git", "")
                    .subcommand(
                        CommandNode::new("commit", "")
                            .option(OptionNode::value("type", "").short('t').choices(["feat"]))
                            .option(OptionNode::value("message", "").short('m')),
                    )
                    .subcommand(
                        CommandNode::new("worktree", "")
                            .option(OptionNode::flag("quiet", ""))
                            .subcommand(
                                CommandNode::new("add", "")
                                    .subcommand(CommandNode::new("deeper", "")),
                            )
                            .subcommand(CommandNode::new("list", "")),
                    ),
            )
            .subcommand(CommandNode::new("init", "").option(
                OptionNode::value("shell", "").choices(["zsh", "bash", "fish"]),
            ))
    }

    #[test]
    fn test_escape_double_quoted() {
        assert_eq!(escape_double_quoted("a\"b$c`d\\"), "a\\\"b\\$c\\`d\\\\");
        assert_eq!(escape_double_quoted("--type"), "--type");
    }

    #[test]
    fn test_escape_double_quoted_keeps_one_line() {
        assert_eq!(escape_double_quoted("two\nlines"), "two lines");
    }

    #[test]
    fn test_short_only_option_words() {
        let root = CommandNode::new("devx", "").subcommand(
            CommandNode::new("log", "")
                .option(OptionNode::value("num", "").short_only('n').choices(["1", "5"]))
                .option(OptionNode::flag("all", "").short('a')),
        );
        let script = BashGenerator.generate(&root);
        assert!(script.contains("compgen -W \"-n --all -a\""));
        assert!(script.contains("if [[ \"${prev}\" == \"-n\" ]]; then"));
        assert!(!script.contains("--num"));
    }

    #[test]
    fn test_registration_and_first_word() {
        let script = BashGenerator.generate(&git_tree());
        assert!(script.ends_with("complete -F _devx devx dx\n"));
        assert!(script.contains("compgen -W \"git init --verbose -v\""));
    }

    #[test]
    fn test_commit_type_override() {
        let script = BashGenerator.generate(&git_tree());
        assert!(script.contains(
            "if [[ \"${prev}\" == \"--type\" || \"${prev}\" == \"-t\" ]]; then"
        ));
        let all_types = COMMIT_TYPES.join(" ");
        assert!(script.contains(&format!("compgen -W \"{all_types}\"")));
        assert!(!script.contains("compgen -W \"feat\""));
    }

    #[test]
    fn test_option_choices_at_depth_one() {
        let script = BashGenerator.generate(&git_tree());
        assert!(script.contains("if [[ \"${prev}\" == \"--shell\" ]]; then"));
        assert!(script.contains("compgen -W \"zsh bash fish\""));
    }

    #[test]
    fn test_depth_two_branch_is_flattened() {
        let script = BashGenerator.generate(&git_tree());
        assert!(script.contains("compgen -W \"add list --quiet\""));
        assert!(!script.contains("COMP_WORDS[3]"));
        assert!(!script.contains("deeper"));
    }
}
