//! The three-phase setup lifecycle and the runtime that sequences it.
//!
//! - [`initialize`] installs dependencies and runs the hook-manager init
//!   unless the hooks directory already exists;
//! - [`prepare`] copies the lint config and hook scripts, skipping files
//!   that are already up to date;
//! - [`deinitialize`] runs the cleanup commands, but only after a fresh init.
//!
//! [`Runtime`] runs them in that order and threads the initialization
//! outcome to deinitialization through a [`ProcessState`](crate::state::ProcessState).
pub mod deinitialize;
pub mod initialize;
pub mod prepare;
mod runtime;

pub use prepare::PrepareReport;
pub use runtime::Runtime;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{Config, ShellCommand};
use crate::error::{ConfigError, SetupError};
use crate::exec::{Executor, resolve_cwd};
use crate::logging::Log;
use crate::operations::{FileSystemOps, SystemFileSystemOps};

/// Shared context for every lifecycle phase.
pub struct Context {
    /// Validated configuration.
    pub config: Arc<Config>,
    /// Where this tool (and its templates) is installed.
    pub package_root: PathBuf,
    /// The project being set up.
    pub project_root: PathBuf,
    /// Logger for output and phase recording.
    pub log: Arc<dyn Log>,
    /// Command executor (real or mocked).
    pub executor: Arc<dyn Executor>,
    /// Filesystem abstraction (real or mocked).
    pub fs_ops: Arc<dyn FileSystemOps>,
    /// Log intended commands and copies instead of performing them.
    pub dry_run: bool,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("package_root", &self.package_root)
            .field("project_root", &self.project_root)
            .field("log", &"<dyn Log>")
            .field("executor", &"<dyn Executor>")
            .field("fs_ops", &"<dyn FileSystemOps>")
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Context {
    /// Create a context using the real filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingOption`] if either root is empty or the
    /// configuration is missing a required value.
    pub fn new(
        config: Config,
        package_root: impl Into<PathBuf>,
        project_root: impl Into<PathBuf>,
        log: Arc<dyn Log>,
        executor: Arc<dyn Executor>,
    ) -> Result<Self, ConfigError> {
        let package_root = package_root.into();
        let project_root = project_root.into();
        if package_root.as_os_str().is_empty() {
            return Err(ConfigError::MissingOption("package_root".to_string()));
        }
        if project_root.as_os_str().is_empty() {
            return Err(ConfigError::MissingOption("project_root".to_string()));
        }
        config.validate()?;

        Ok(Self {
            config: Arc::new(config),
            package_root,
            project_root,
            log,
            executor,
            fs_ops: Arc::new(SystemFileSystemOps),
            dry_run: false,
        })
    }

    /// Replace the filesystem implementation.
    #[must_use]
    pub fn with_fs_ops(mut self, fs_ops: Arc<dyn FileSystemOps>) -> Self {
        self.fs_ops = fs_ops;
        self
    }

    /// Enable or disable dry-run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Hook templates directory inside the package.
    #[must_use]
    pub fn hooks_source(&self) -> PathBuf {
        self.package_root.join(&self.config.hooks.source)
    }

    /// Hooks directory inside the project.
    #[must_use]
    pub fn hooks_dest(&self) -> PathBuf {
        self.project_root.join(&self.config.hooks.dest)
    }

    /// Lint config template inside the package.
    #[must_use]
    pub fn lint_source(&self) -> PathBuf {
        self.package_root.join(&self.config.lint_config.source)
    }

    /// Lint config destination inside the project.
    #[must_use]
    pub fn lint_dest(&self) -> PathBuf {
        self.project_root.join(&self.config.lint_config.dest)
    }

    /// Ignore file inside the project.
    #[must_use]
    pub fn ignore_path(&self) -> PathBuf {
        self.project_root.join(&self.config.ignore.path)
    }

    /// Returns `true` when the tool runs from inside the target project.
    ///
    /// Paths are canonicalised when possible so `.`-relative and symlinked
    /// spellings of the same directory compare equal.
    #[must_use]
    pub fn runs_inside_project(&self) -> bool {
        canonical(&self.package_root) == canonical(&self.project_root)
    }

    /// Run `command` from the project root (or its configured `cwd`).
    ///
    /// In dry-run mode the command is only logged.
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] if the command cannot be spawned or exits
    /// non-zero.
    pub fn run_command(&self, command: &ShellCommand) -> Result<(), SetupError> {
        if self.dry_run {
            self.log.dry_run(&format!("would run: {command}"));
            return Ok(());
        }
        let cwd = resolve_cwd(command, &self.project_root);
        self.log
            .debug(&format!("running: {command} (in {})", cwd.display()));
        self.executor.run(command, &cwd)?;
        Ok(())
    }
}

fn canonical(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
