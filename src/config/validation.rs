//! Configuration validation.
//!
//! Every check runs before any side effect so that an integration error
//! (an empty command, a blank path) fails the run immediately.
use std::path::Path;

use super::{Config, ShellCommand};
use crate::error::ConfigError;

fn require_path(path: &Path, name: &str) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::MissingOption(name.to_string()));
    }
    Ok(())
}

fn require_command(cmd: &ShellCommand, name: &str) -> Result<(), ConfigError> {
    if cmd.command.trim().is_empty() {
        return Err(ConfigError::MissingOption(name.to_string()));
    }
    Ok(())
}

impl Config {
    /// Check that every required option is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingOption`] naming the first empty option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_path(&self.hooks.source, "hooks.source")?;
        require_path(&self.hooks.dest, "hooks.dest")?;
        require_path(&self.lint_config.source, "lint_config.source")?;
        require_path(&self.lint_config.dest, "lint_config.dest")?;
        require_command(&self.commands.install, "commands.install")?;
        require_command(&self.commands.init, "commands.init")?;
        for (i, cmd) in self.commands.cleanup.iter().enumerate() {
            require_command(cmd, &format!("commands.cleanup[{i}]"))?;
        }
        for (i, name) in self.hook_files.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ConfigError::MissingOption(format!("hook_files[{i}]")));
            }
        }
        if !self.ignore.entries.is_empty() {
            require_path(&self.ignore.path, "ignore.path")?;
        }
        Ok(())
    }
}
