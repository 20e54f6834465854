pub mod bash;
pub mod fish;
pub mod zsh;

pub use bash::BashGenerator;
pub use fish::FishGenerator;
pub use zsh::ZshGenerator;

use super::model::CommandNode;

/// Turns a command tree into a completion script for one shell.
pub trait ShellGenerator {
    fn generate(&self, root: &CommandNode) -> String;
}

/// Collapse line breaks, tabs and runs of spaces so emitted text stays on
/// one line.
pub(crate) fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Make a command name usable inside a shell function name.
pub(crate) fn identifier(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_collapses_whitespace() {
        assert_eq!(single_line("Don't do it\nreally"), "Don't do it really");
        assert_eq!(single_line("a\r\n\tb   c"), "a b c");
        assert_eq!(single_line("plain"), "plain");
    }

    #[test]
    fn test_identifier_replaces_punctuation() {
        assert_eq!(identifier("worktree"), "worktree");
        assert_eq!(identifier("dry-run"), "dry_run");
        assert_eq!(identifier("a.b c"), "a_b_c");
    }
}
