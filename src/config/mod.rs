//! Static description of what the bootstrapper places and runs.
//!
//! A [`Config`] names the template paths (relative to the package root),
//! their destinations (relative to the project root), the ordered list of
//! hook scripts to materialise, and the shell commands for dependency
//! installation, hook-manager initialisation and cleanup.
pub mod toml_loader;
pub mod validation;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// All configuration for one run.
///
/// Created once at process start and never mutated afterwards.  Sections
/// omitted from a TOML file fall back to [`Config::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Hook script file names, copied in this order.
    pub hook_files: Vec<String>,
    /// Hook templates directory and the project's hooks directory.
    pub hooks: PathPair,
    /// Commit-lint config template and its destination.
    pub lint_config: PathPair,
    /// Shell commands run by the lifecycle phases.
    pub commands: Commands,
    /// Entries guaranteed to be present in the project's ignore file.
    pub ignore: IgnoreRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hook_files: ["_/husky.sh", "commit-msg", "pre-commit", "pre-push"]
                .into_iter()
                .map(String::from)
                .collect(),
            hooks: PathPair::new("templates/husky", ".husky"),
            lint_config: PathPair::new(
                "templates/commitlint/.commitlintrc.json",
                ".commitlintrc.json",
            ),
            commands: Commands::default(),
            ignore: IgnoreRules::default(),
        }
    }
}

/// A template source and where it lands in the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathPair {
    /// Path relative to the package root.
    pub source: PathBuf,
    /// Path relative to the project root.
    pub dest: PathBuf,
}

impl PathPair {
    /// Create a path pair from anything path-like.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
        }
    }
}

/// The shell commands issued during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Commands {
    /// Installs the hook manager and linter as dev dependencies.
    pub install: ShellCommand,
    /// Initialises the hook manager (creates the hooks directory).
    pub init: ShellCommand,
    /// Run in order during deinitialization after a fresh init.
    pub cleanup: Vec<ShellCommand>,
}

impl Default for Commands {
    fn default() -> Self {
        Self {
            install: ShellCommand::new(
                "npm install -D husky @commitlint/cli @commitlint/config-conventional",
            ),
            init: ShellCommand::new("npx husky init"),
            cleanup: vec![ShellCommand::new("npm pkg delete scripts.prepare")],
        }
    }
}

/// A shell command line plus how to run it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShellCommand {
    /// Command line handed to the platform shell.
    pub command: String,
    /// Execution options.
    #[serde(default)]
    pub options: ExecOptions,
}

impl ShellCommand {
    /// Create a command with default options (inherited stdio, project cwd).
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            options: ExecOptions::default(),
        }
    }
}

impl std::fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.command)
    }
}

/// How a [`ShellCommand`] is executed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExecOptions {
    /// Whether output goes to the terminal or is captured.
    pub stdio: Stdio,
    /// Working directory, relative to the project root; the project root
    /// itself when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
}

/// Subprocess output handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stdio {
    /// Pass output straight through to the controlling terminal.
    #[default]
    Inherit,
    /// Capture output; stderr is attached to failure messages.
    Capture,
}

/// Lines the project's ignore file must contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IgnoreRules {
    /// Ignore file, relative to the project root.
    pub path: PathBuf,
    /// Entries appended when not already present.
    pub entries: Vec<String>,
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".gitignore"),
            entries: vec!["node_modules/".to_string()],
        }
    }
}
