//! Initialization phase: install dependencies and initialise the hook manager.
use anyhow::Result;

use super::Context;
use crate::state::HookSetup;

/// Phase name used in logs and the run summary.
pub const NAME: &str = "Initialize";

/// Install the tooling dependencies and initialise the hook manager.
///
/// The install command runs unless the package root and project root are
/// the same directory.  If the project's hooks directory already exists the
/// init command is not run and the returned [`HookSetup`] has `skip` set;
/// otherwise init runs and `skip` is `false`.
///
/// In dry-run mode the commands are logged instead of executed, but the
/// returned [`HookSetup`] still reflects whether the hooks directory exists.
///
/// # Errors
///
/// Returns an error if the install or init command fails.  Nothing is
/// recorded for later phases in that case.
pub fn run(ctx: &Context) -> Result<HookSetup> {
    if ctx.runs_inside_project() {
        ctx.log.info("dev dependencies already installed, skipping");
    } else {
        ctx.log.info("installing dev dependencies");
        ctx.run_command(&ctx.config.commands.install)?;
    }

    let hooks_dest = ctx.hooks_dest();
    if ctx.fs_ops.exists(&hooks_dest) {
        ctx.log.info(&format!(
            "{} already exists, skipping hook manager initialization",
            hooks_dest.display()
        ));
        return Ok(HookSetup::SKIPPED);
    }

    ctx.log.info("initializing hook manager");
    ctx.run_command(&ctx.config.commands.init)?;
    Ok(HookSetup::FRESH)
}
