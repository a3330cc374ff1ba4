//! Shell completion generation

use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell as ClapShell;

use crate::cli::args::{Cli, CompletionsArgs, Shell};

impl From<Shell> for ClapShell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => Self::Bash,
            Shell::Zsh => Self::Zsh,
            Shell::Fish => Self::Fish,
            Shell::PowerShell => Self::PowerShell,
            Shell::Elvish => Self::Elvish,
        }
    }
}

/// Writes the completion script for `shell` to `out`.
pub fn generate_to(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_owned();
    clap_complete::generate(ClapShell::from(shell), &mut cmd, bin, out);
}

/// Prints the completion script to stdout.
pub fn run(args: &CompletionsArgs) {
    generate_to(args.shell, &mut std::io::stdout().lock());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(shell: Shell) -> String {
        let mut buf = Vec::new();
        generate_to(shell, &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn bash_script_covers_demo_flags() {
        let bash = script(Shell::Bash);
        assert!(bash.contains("logwrap"));
        assert!(bash.contains("decorator"));
        assert!(bash.contains("--then-level"));
    }

    #[test]
    fn every_shell_produces_a_script() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            assert!(!script(shell).is_empty(), "{shell:?} script is empty");
        }
    }
}
