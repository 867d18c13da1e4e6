//! Command: generate shell completions.
use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::{Cli, CompletionsOpts};

/// Write the completion script for `opts.shell` to stdout.
pub fn run(opts: &CompletionsOpts) {
    write(opts.shell, &mut std::io::stdout());
}

/// Write the completion script for `shell` to `out`.
pub fn write(shell: Shell, out: &mut dyn Write) {
    clap_complete::generate(shell, &mut Cli::command(), "commitkit", out);
}
