//! Deinitialization phase: undo what a fresh hook-manager init leaves behind.
use anyhow::Result;

use super::Context;
use crate::error::LifecycleError;
use crate::state::{ProcessState, StateKey};

/// Phase name used in logs and the run summary.
pub const NAME: &str = "Deinitialize";

/// What deinitialization did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The hooks directory pre-existed; cleanup was not needed.
    Skipped,
    /// Every cleanup command ran.
    CleanedUp,
}

/// Run the cleanup commands if initialization freshly set up the hooks.
///
/// Cleanup runs when the recorded [`HookSetup`](crate::state::HookSetup) has
/// `skip == false` and is skipped otherwise.  `state` is cleared before
/// returning, whatever the result.
///
/// # Errors
///
/// Returns [`LifecycleError::MissingState`] if initialization recorded
/// nothing, or the first cleanup command failure; later commands are not run.
pub fn run(ctx: &Context, state: &mut ProcessState) -> Result<Outcome> {
    let setup = state.get(StateKey::Hooks);
    state.clear();
    let setup = setup.ok_or(LifecycleError::MissingState)?;

    if setup.skip {
        ctx.log.info("skipped: deinitialization");
        return Ok(Outcome::Skipped);
    }

    ctx.log.info("running cleanup commands");
    for command in &ctx.config.commands.cleanup {
        ctx.run_command(command)?;
    }
    Ok(Outcome::CleanedUp)
}
