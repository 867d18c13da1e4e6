//! Git commit-tooling bootstrapper.
//!
//! Sets up a hook manager and a commit-message linter in a project: installs
//! the dev dependencies, initialises the hooks directory, copies the hook
//! scripts and lint config from packaged templates, and undoes the
//! package-manifest edits a fresh hook-manager init leaves behind.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: what to copy and which commands to run (TOML or defaults)
//! - **[`resources`]**: idempotent `check + apply` primitives for template
//!   and ignore files
//! - **[`lifecycle`]**: the initialize, prepare and deinitialize phases and
//!   the [`Runtime`](lifecycle::Runtime) that sequences them
//! - **[`commands`]**: top-level subcommand entry points (`setup`, `config`, …)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod lifecycle;
pub mod logging;
pub mod operations;
pub mod resources;
pub mod state;
