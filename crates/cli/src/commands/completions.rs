use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::generate;
use clap_complete::shells::{Bash, Fish, Zsh};

use crate::args::{Cli, CompletionShell};

pub fn generate_completions(shell: CompletionShell) {
    write_completions(shell, &mut io::stdout());
}

/// Completion script for `ihub` in the given shell's syntax.
pub fn write_completions(shell: CompletionShell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    match shell {
        CompletionShell::Bash => generate(Bash, &mut cmd, name, out),
        CompletionShell::Zsh => generate(Zsh, &mut cmd, name, out),
        CompletionShell::Fish => generate(Fish, &mut cmd, name, out),
    }
}
