use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Top-level CLI entry point for the commit tooling bootstrapper.
#[derive(Parser, Debug)]
#[command(
    name = "commitkit",
    about = "Set up git hooks and commit-message linting in a project",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Load configuration from a TOML file instead of the built-in defaults
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install dependencies, initialise hooks and copy templates
    Setup(SetupOpts),
    /// Print the effective configuration as TOML
    Config,
    /// Generate shell completions
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

/// Options for the `setup` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct SetupOpts {
    /// Directory holding the templates (defaults to $COMMITKIT_ROOT, then the
    /// install location)
    #[arg(long, value_name = "DIR")]
    pub package_root: Option<PathBuf>,

    /// Project to set up (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub project_root: Option<PathBuf>,
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
