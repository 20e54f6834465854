use super::{identifier, single_line, ShellGenerator};
use crate::cli::completion::model::{ArgumentNode, CommandNode, OptionNode};
use crate::cli::completion::registry::{
    argument_source, dynamic_completions, ArgumentSource, CONFIG_KEYS,
};
use crate::cli::{ALIAS_NAME, CLI_NAME};

pub struct ZshGenerator;

impl ShellGenerator for ZshGenerator {
    fn generate(&self, root: &CommandNode) -> String {
        let base = format!("_{}", identifier(CLI_NAME));
        let mut out = String::new();

        out.push_str(&format!("#compdef {CLI_NAME} {ALIAS_NAME}\n\n"));
        out.push_str(&format!(
            "# zsh completion for {CLI_NAME}. Generated by `{CLI_NAME} completion zsh`, do not edit.\n\n"
        ));

        for entry in dynamic_completions() {
            out.push_str(&format!("{}() {{\n", entry.function));
            out.push_str("  local -a candidates\n");
            out.push_str(&format!("  candidates=(${{(f)\"$({})\"}})\n", entry.command));
            out.push_str(&format!(
                "  _describe -t {} '{}' candidates\n",
                entry.name,
                escape_single_quotes(entry.description)
            ));
            out.push_str("}\n\n");
        }

        write_function(&mut out, root, &base, &[]);

        out.push_str(&format!("if [ \"$funcstack[1]\" = \"{base}\" ]; then\n"));
        out.push_str(&format!("  {base} \"$@\"\n"));
        out.push_str("else\n");
        out.push_str(&format!("  compdef {base} {CLI_NAME} {ALIAS_NAME}\n"));
        out.push_str("fi\n");

        out
    }
}

/// `'` closes the quoted string, so it becomes `'\''`. Output is a single line.
pub fn escape_single_quotes(text: &str) -> String {
    single_line(text).replace('\'', "'\\''")
}

/// `_arguments` delimits option descriptions with brackets.
pub fn escape_brackets(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}

fn option_description(option: &OptionNode) -> String {
    escape_brackets(&escape_single_quotes(&option.description))
}

fn function_name(base: &str, path: &[&str]) -> String {
    path.iter()
        .fold(base.to_string(), |name, part| format!("{name}_{}", identifier(part)))
}

/// Children are written before the node itself so every function a node
/// dispatches to is already defined above it.
fn write_function(out: &mut String, node: &CommandNode, base: &str, path: &[&str]) {
    for child in &node.subcommands {
        let mut child_path = path.to_vec();
        child_path.push(&child.name);
        write_function(out, child, base, &child_path);
    }

    let name = function_name(base, path);
    if node.is_leaf() {
        write_leaf(out, node, &name);
    } else {
        write_branch(out, node, base, path, &name);
    }
}

fn option_specs(node: &CommandNode) -> Vec<String> {
    let mut specs = Vec::new();

    for option in &node.options {
        let description = option_description(option);
        let value = if option.is_boolean {
            String::new()
        } else {
            let arg_name = option.arg_name.as_deref().unwrap_or(&option.long);
            let action = option
                .choice_list()
                .map(|choices| format!("({})", choice_words(choices.iter().map(String::as_str))))
                .unwrap_or_default();
            format!(":{}:{}", escape_single_quotes(arg_name), action)
        };

        if let Some(short) = option.short {
            specs.push(format!("'-{short}[{description}]{value}'"));
        }
        if option.short_only {
            continue;
        }

        let marker = if option.is_boolean { "" } else { "=" };
        specs.push(format!("'--{}{marker}[{description}]{value}'", option.long));
    }

    specs
}

fn choice_words<'a>(choices: impl Iterator<Item = &'a str>) -> String {
    choices
        .map(escape_single_quotes)
        .collect::<Vec<_>>()
        .join(" ")
}

fn argument_spec(arg: &ArgumentNode, position: usize, parent: &CommandNode) -> String {
    let source = argument_source(arg, parent);
    let action = match source {
        ArgumentSource::Dynamic(entry) => entry.function.to_string(),
        ArgumentSource::Choices(choices) => {
            format!("({})", choice_words(choices.iter().map(String::as_str)))
        }
        ArgumentSource::ConfigKeys => format!("({})", choice_words(CONFIG_KEYS.iter().copied())),
        ArgumentSource::Rest | ArgumentSource::Positional => "_default".to_string(),
    };

    let name = escape_single_quotes(&arg.name);
    if arg.variadic || source == ArgumentSource::Rest {
        format!("'*:{name}:{action}'")
    } else if arg.required {
        format!("'{position}:{name}:{action}'")
    } else {
        format!("'{position}::{name}:{action}'")
    }
}

fn write_arguments_call(out: &mut String, flags: &str, specs: &[String], tail: &str) {
    let call = if flags.is_empty() {
        "_arguments".to_string()
    } else {
        format!("_arguments {flags}")
    };

    if specs.is_empty() {
        out.push_str(&format!("  {call}{tail}\n"));
        return;
    }

    out.push_str(&format!("  {call} \\\n"));
    for (i, spec) in specs.iter().enumerate() {
        if i + 1 == specs.len() {
            out.push_str(&format!("    {spec}{tail}\n"));
        } else {
            out.push_str(&format!("    {spec} \\\n"));
        }
    }
}

fn write_leaf(out: &mut String, node: &CommandNode, name: &str) {
    let mut specs = option_specs(node);
    specs.extend(
        node.arguments
            .iter()
            .enumerate()
            .map(|(i, arg)| argument_spec(arg, i + 1, node)),
    );

    let has_rest = node.arguments.iter().any(|a| a.variadic);
    if node.allow_unknown_option && !has_rest {
        specs.push("'*:: :_default'".to_string());
    }

    out.push_str(&format!("{name}() {{\n"));
    if specs.is_empty() {
        out.push_str("  _message 'no more arguments'\n");
    } else {
        write_arguments_call(out, "", &specs, "");
    }
    out.push_str("}\n\n");
}

fn write_branch(out: &mut String, node: &CommandNode, base: &str, path: &[&str], name: &str) {
    let mut specs = option_specs(node);
    specs.push("'1: :->cmds'".to_string());
    specs.push("'*:: :->args'".to_string());

    let label = std::iter::once(CLI_NAME)
        .chain(path.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");

    out.push_str(&format!("{name}() {{\n"));
    out.push_str("  local curcontext=\"$curcontext\" state line ret=1\n");
    out.push_str("  typeset -A opt_args\n\n");
    write_arguments_call(out, "-C", &specs, " && ret=0");
    out.push('\n');
    out.push_str("  case $state in\n");
    out.push_str("    cmds)\n");
    out.push_str("      local -a subcommands\n");
    out.push_str("      subcommands=(\n");
    for child in &node.subcommands {
        out.push_str(&format!(
            "        '{}:{}'\n",
            escape_single_quotes(&child.name),
            escape_single_quotes(&child.description)
        ));
    }
    out.push_str("      )\n");
    out.push_str(&format!(
        "      _describe -t commands '{} commands' subcommands && ret=0\n",
        escape_single_quotes(&label)
    ));
    out.push_str("      ;;\n");
    out.push_str("    args)\n");
    out.push_str("      case $line[1] in\n");
    for child in &node.subcommands {
        let mut child_path = path.to_vec();
        child_path.push(&child.name);
        out.push_str(&format!("        {})\n", child.name));
        out.push_str(&format!(
            "          {} && ret=0\n",
            function_name(base, &child_path)
        ));
        out.push_str("          ;;\n");
    }
    out.push_str("      esac\n");
    out.push_str("      ;;\n");
    out.push_str("  esac\n\n");
    out.push_str("  return ret\n");
    out.push_str("}\n\n");
}
