//! Domain-specific error types for the commit tooling bootstrapper.
//!
//! Library modules return the typed errors below; command handlers at the
//! CLI boundary convert them to [`anyhow::Error`] via the `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! CommitkitError
//! ├── Config(ConfigError)        missing options, TOML loading
//! ├── Setup(SetupError)          subprocess spawn/exit failures (fatal)
//! ├── File(FileError)            template placement (logged, non-fatal)
//! └── Lifecycle(LifecycleError)  phases invoked out of order
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the bootstrapper.
#[derive(Error, Debug)]
pub enum CommitkitError {
    /// Configuration-related error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A shell command could not be run or exited non-zero.
    #[error("Setup error: {0}")]
    Setup(#[from] SetupError),

    /// A template file could not be placed.
    #[error("File error: {0}")]
    File(#[from] FileError),

    /// A lifecycle phase ran without its prerequisites.
    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),
}

/// Errors raised while building or loading configuration.
///
/// These are raised before any side effect takes place.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required option is absent or empty.
    #[error("{0} is required")]
    MissingOption(String),

    /// The configuration file could not be read.
    #[error("IO error reading config file {}: {source}", path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for the expected schema.
    #[error("Invalid config in {}: {message}", path.display())]
    Parse {
        /// Path to the offending file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}

/// Errors raised by subprocess invocation.
#[derive(Error, Debug)]
pub enum SetupError {
    /// The shell could not be spawned at all.
    #[error("failed to execute: {command}")]
    Spawn {
        /// Command line that was being run.
        command: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The command ran but exited unsuccessfully.
    #[error("{command} failed (exit {code}): {stderr}")]
    Subprocess {
        /// Command line that failed.
        command: String,
        /// Exit code, or `-1` when terminated by a signal.
        code: i32,
        /// Captured stderr (empty when stdio is inherited).
        stderr: String,
    },
}

/// Errors raised while placing template files into the project.
///
/// The preparation phase logs these and moves on to the next file.
#[derive(Error, Debug)]
pub enum FileError {
    /// Copying a template to its destination failed.
    #[error("Error copying {} to {}: {source}", src.display(), dest.display())]
    Copy {
        /// Template path inside the package.
        src: PathBuf,
        /// Destination path inside the project.
        dest: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Creating a destination directory failed.
    #[error("Error creating directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Updating the ignore-rules file failed.
    #[error("Error updating ignore rules {}: {source}", path.display())]
    Ignore {
        /// Ignore file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors raised when lifecycle phases are driven incorrectly.
#[derive(Error, Debug)]
pub enum LifecycleError {
    /// Deinitialization ran without a recorded initialization outcome.
    #[error("no hook setup state recorded; initialization must run first")]
    MissingState,
}
