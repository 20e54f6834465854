//! Converts a live `clap::Command` into the completion IR.

use super::model::{ArgumentNode, CommandNode, OptionNode};
use clap::{Arg, ArgAction, Command};
use std::collections::HashSet;
use tracing::debug;

/// Walk `cmd` and every visible subcommand below it.
///
/// The command is cloned and built first so clap's derived metadata (value
/// counts, auto-generated help) is in place before it is inspected.
pub fn walk(cmd: &Command) -> CommandNode {
    let mut built = cmd.clone();
    built.build();
    walk_built(&built, &HashSet::new())
}

/// `inherited` holds the ids of globals declared on an ancestor.
fn walk_built(cmd: &Command, inherited: &HashSet<String>) -> CommandNode {
    let name = cmd.get_name().to_string();
    debug_assert!(!name.is_empty(), "command definitions must be named");

    let options: Vec<OptionNode> = cmd
        .get_arguments()
        .filter(|arg| !arg.is_positional() && is_completable(arg))
        // clap copies an ancestor's globals into every subcommand when
        // building; only the declaring command lists them.
        .filter(|arg| !(arg.is_global_set() && inherited.contains(arg.get_id().as_str())))
        .map(option_node)
        .collect();

    let arguments: Vec<ArgumentNode> = cmd
        .get_positionals()
        .filter(|arg| is_completable(arg))
        .map(argument_node)
        .collect();

    let mut below = inherited.clone();
    below.extend(
        cmd.get_arguments()
            .filter(|arg| arg.is_global_set())
            .map(|arg| arg.get_id().as_str().to_string()),
    );

    let subcommands: Vec<CommandNode> = cmd
        .get_subcommands()
        .filter(|sub| sub.get_name() != "help" && !sub.is_hide_set())
        .map(|sub| walk_built(sub, &below))
        .collect();

    let allow_unknown_option = cmd.is_allow_external_subcommands_set()
        || cmd.get_positionals().any(|arg| arg.is_allow_hyphen_values_set());

    debug!(
        command = %name,
        options = options.len(),
        arguments = arguments.len(),
        subcommands = subcommands.len(),
        "walked command"
    );

    CommandNode {
        name,
        description: command_description(cmd),
        options,
        arguments,
        subcommands,
        allow_unknown_option,
    }
}

fn is_completable(arg: &Arg) -> bool {
    !arg.is_hide_set()
        && !matches!(
            arg.get_action(),
            ArgAction::Help | ArgAction::HelpShort | ArgAction::HelpLong | ArgAction::Version
        )
}

fn command_description(cmd: &Command) -> String {
    cmd.get_about()
        .or_else(|| cmd.get_long_about())
        .map(|about| about.to_string())
        .unwrap_or_default()
}

fn arg_description(arg: &Arg) -> String {
    arg.get_help()
        .or_else(|| arg.get_long_help())
        .map(|help| help.to_string())
        .unwrap_or_default()
}

fn takes_value(arg: &Arg) -> bool {
    arg.get_action().takes_values()
}

fn is_variadic(arg: &Arg) -> bool {
    matches!(arg.get_action(), ArgAction::Append)
        || arg
            .get_num_args()
            .is_some_and(|range| range.max_values() > 1)
}

fn choices(arg: &Arg) -> Option<Vec<String>> {
    let values: Vec<String> = arg
        .get_possible_values()
        .into_iter()
        .filter(|value| !value.is_hide_set())
        .map(|value| value.get_name().to_string())
        .collect();

    (!values.is_empty()).then_some(values)
}

fn option_node(arg: &Arg) -> OptionNode {
    let long = arg
        .get_long()
        .map(str::to_string)
        .unwrap_or_else(|| arg.get_id().as_str().to_string());
    let short = arg.get_short();
    let short_only = arg.get_long().is_none() && short.is_some();
    let is_boolean = !takes_value(arg);

    let mut flags = match short {
        Some(s) if short_only => format!("-{s}"),
        Some(s) => format!("-{s}, --{long}"),
        None => format!("--{long}"),
    };
    if !is_boolean {
        flags.push_str(&format!(" <{long}>"));
    }

    OptionNode {
        flags,
        short,
        short_only,
        description: arg_description(arg),
        required: !is_boolean
            && arg
                .get_num_args()
                .map_or(true, |range| range.min_values() > 0),
        is_boolean,
        is_variadic: !is_boolean && is_variadic(arg),
        arg_name: (!is_boolean).then(|| long.clone()),
        choices: if is_boolean { None } else { choices(arg) },
        long,
    }
}

fn argument_node(arg: &Arg) -> ArgumentNode {
    ArgumentNode {
        name: arg.get_id().as_str().to_string(),
        description: arg_description(arg),
        required: arg.is_required_set(),
        variadic: is_variadic(arg),
        choices: choices(arg),
    }
}
