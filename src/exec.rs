//! Shell command execution.
//!
//! Commands are handed to the platform shell (`sh -c` on Unix, `cmd /C` on
//! Windows) and block until they exit.  Only the exit status is observed
//! unless [`Stdio::Capture`] is requested.
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::config::{ShellCommand, Stdio};
use crate::error::SetupError;

/// Result of a command execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecResult {
    /// Captured stdout (empty when stdio is inherited).
    pub stdout: String,
    /// Captured stderr (empty when stdio is inherited).
    pub stderr: String,
    /// Whether the process exited successfully.
    pub success: bool,
    /// Exit code, if the process was not killed by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Abstraction over subprocess execution so lifecycle phases can be tested
/// without spawning real package managers.
#[cfg_attr(test, mockall::automock)]
pub trait Executor: Send + Sync + std::fmt::Debug {
    /// Run `command` in `cwd`, blocking until it exits.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Spawn`] if the shell cannot be started and
    /// [`SetupError::Subprocess`] if the command exits non-zero.
    fn run(&self, command: &ShellCommand, cwd: &Path) -> Result<ExecResult, SetupError>;
}

/// Production [`Executor`] backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

/// Build a [`Command`] that runs `line` through the platform shell.
fn shell(line: &str) -> Command {
    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", line]);
        cmd
    }
    #[cfg(not(windows))]
    {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", line]);
        cmd
    }
}

impl Executor for SystemExecutor {
    fn run(&self, command: &ShellCommand, cwd: &Path) -> Result<ExecResult, SetupError> {
        let mut cmd = shell(&command.command);
        cmd.current_dir(cwd);

        let spawn_err = |source| SetupError::Spawn {
            command: command.command.clone(),
            source,
        };

        let result = match command.options.stdio {
            Stdio::Inherit => {
                let status = cmd
                    .stdin(std::process::Stdio::inherit())
                    .stdout(std::process::Stdio::inherit())
                    .stderr(std::process::Stdio::inherit())
                    .status()
                    .map_err(spawn_err)?;
                ExecResult {
                    success: status.success(),
                    code: status.code(),
                    ..ExecResult::default()
                }
            }
            Stdio::Capture => ExecResult::from(cmd.output().map_err(spawn_err)?),
        };

        if !result.success {
            return Err(SetupError::Subprocess {
                command: command.command.clone(),
                code: result.code.unwrap_or(-1),
                stderr: result.stderr.trim().to_string(),
            });
        }
        Ok(result)
    }
}

/// Working directory for `command`: its configured `cwd` resolved against
/// `project_root`, or `project_root` itself.
#[must_use]
pub fn resolve_cwd(command: &ShellCommand, project_root: &Path) -> PathBuf {
    command
        .options
        .cwd
        .as_ref()
        .map_or_else(|| project_root.to_path_buf(), |cwd| project_root.join(cwd))
}
