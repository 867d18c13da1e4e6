//! Sequences the lifecycle phases and owns the run-scoped state.
use anyhow::Result;

use super::deinitialize::{self, Outcome};
use super::{Context, initialize, prepare};
use crate::logging::PhaseStatus;
use crate::state::{ProcessState, StateKey};

/// Runs initialization, preparation and deinitialization in order.
///
/// The [`ProcessState`] lives here for exactly one [`run`](Self::run):
/// initialization's outcome is recorded into it, deinitialization reads it
/// back, and it is empty again once the run ends.
#[derive(Debug)]
pub struct Runtime {
    ctx: Context,
    state: ProcessState,
}

impl Runtime {
    /// Create a runtime around a validated context.
    #[must_use]
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            state: ProcessState::new(),
        }
    }

    /// Run-scoped state; empty outside of [`run`](Self::run).
    #[must_use]
    pub const fn state(&self) -> &ProcessState {
        &self.state
    }

    /// Run all three phases.
    ///
    /// Each phase is logged as a stage and recorded for the summary.  The
    /// first failing phase is recorded as failed and ends the run; later
    /// phases do not start.
    ///
    /// # Errors
    ///
    /// Returns the error of the first phase that fails.
    pub fn run(&mut self) -> Result<()> {
        let ctx = &self.ctx;
        let dry = |status| if ctx.dry_run { PhaseStatus::DryRun } else { status };

        ctx.log.stage(initialize::NAME);
        let setup = initialize::run(ctx).map_err(|e| fail(ctx, initialize::NAME, e))?;
        self.state.set(StateKey::Hooks, setup);
        let detail = if setup.skip {
            "hooks already present"
        } else {
            "hook manager initialized"
        };
        ctx.log
            .record_phase(initialize::NAME, dry(PhaseStatus::Ok), Some(detail));

        ctx.log.stage(prepare::NAME);
        let report = prepare::run(ctx);
        ctx.log.record_phase(
            prepare::NAME,
            dry(PhaseStatus::Ok),
            Some(&report.to_string()),
        );

        ctx.log.stage(deinitialize::NAME);
        match deinitialize::run(ctx, &mut self.state) {
            Ok(Outcome::Skipped) => ctx.log.record_phase(
                deinitialize::NAME,
                PhaseStatus::Skipped,
                Some("hooks pre-existed"),
            ),
            Ok(Outcome::CleanedUp) => {
                ctx.log
                    .record_phase(deinitialize::NAME, dry(PhaseStatus::Ok), None);
            }
            Err(e) => return Err(fail(ctx, deinitialize::NAME, e)),
        }

        Ok(())
    }
}

fn fail(ctx: &Context, name: &str, e: anyhow::Error) -> anyhow::Error {
    ctx.log.error(&format!("{name}: {e:#}"));
    ctx.log
        .record_phase(name, PhaseStatus::Failed, Some(&format!("{e:#}")));
    e
}
