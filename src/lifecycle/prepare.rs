//! Preparation phase: materialise the lint config and hook scripts.
use super::Context;
use crate::resources::fs::ensure_dir;
use crate::resources::ignore::IgnoreFile;
use crate::resources::template::TemplateFile;
use crate::resources::{Applicable, Resource, ResourceState};

/// Phase name used in logs and the run summary.
pub const NAME: &str = "Prepare";

/// Tally of what the preparation phase did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrepareReport {
    /// Files copied into the project.
    pub copied: usize,
    /// Files left alone because they already matched their template.
    pub up_to_date: usize,
    /// Templates absent from the package.
    pub missing: usize,
    /// Copies that failed.
    pub failed: usize,
    /// Copies that would have happened (dry run only).
    pub planned: usize,
}

impl std::fmt::Display for PrepareReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} copied, {} up to date, {} missing, {} failed",
            self.copied, self.up_to_date, self.missing, self.failed
        )?;
        if self.planned > 0 {
            write!(f, ", {} planned", self.planned)?;
        }
        Ok(())
    }
}

/// Copy the lint config and every configured hook script into the project.
///
/// Each file is copied only if the destination is missing or its trimmed
/// content differs from the template, so a second run copies nothing.
/// Copied hooks are made executable.  Missing templates and failed copies
/// are logged and the phase moves on to the next file, so this never fails.
///
/// Finally the configured ignore entries are appended to the project's
/// ignore file; a failure there is only a warning.
#[must_use]
pub fn run(ctx: &Context) -> PrepareReport {
    let mut report = PrepareReport::default();
    let fs = &*ctx.fs_ops;

    let lint = TemplateFile::new(ctx.lint_source(), ctx.lint_dest(), fs);
    let missing = format!(
        "lint config template not found, skipping: {}",
        lint.source.display()
    );
    place(ctx, &lint, &missing, &mut report);

    let hooks_source = ctx.hooks_source();
    let hooks_dest = ctx.hooks_dest();
    if !ctx.dry_run
        && let Err(e) = ensure_dir(fs, &hooks_dest)
    {
        ctx.log.error(&e.to_string());
    }

    for hook in &ctx.config.hook_files {
        let file = TemplateFile::hook(hooks_source.join(hook), hooks_dest.join(hook), fs);
        let missing = format!("hook template \"{hook}\" not found, skipping");
        place(ctx, &file, &missing, &mut report);
    }

    update_ignore_file(ctx);

    ctx.log.debug(&format!("prepare: {report}"));
    report
}

/// Check one template against its destination and copy it when needed.
fn place(ctx: &Context, file: &TemplateFile<'_>, missing: &str, report: &mut PrepareReport) {
    match file.current_state() {
        Ok(ResourceState::Invalid { .. }) => {
            ctx.log.warn(missing);
            report.missing += 1;
        }
        Ok(ResourceState::Correct) => {
            ctx.log
                .info(&format!("skipped: {} already up to date", file.description()));
            report.up_to_date += 1;
        }
        Ok(ResourceState::Missing | ResourceState::Incorrect { .. }) => {
            copy(ctx, file, report);
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", file.description()));
            report.failed += 1;
        }
    }
}

fn copy(ctx: &Context, file: &TemplateFile<'_>, report: &mut PrepareReport) {
    let (src, dest) = (file.source.display(), file.dest.display());
    if ctx.dry_run {
        ctx.log.dry_run(&format!("would copy: {src} -> {dest}"));
        report.planned += 1;
        return;
    }
    match file.apply() {
        Ok(_) => {
            ctx.log.info(&format!("copied: {src} -> {dest}"));
            report.copied += 1;
        }
        Err(e) => {
            ctx.log.error(&format!("{e:#}"));
            report.failed += 1;
        }
    }
}

fn update_ignore_file(ctx: &Context) {
    let rules = &ctx.config.ignore;
    if rules.entries.is_empty() {
        return;
    }
    let ignore = IgnoreFile::new(ctx.ignore_path(), rules.entries.clone(), &*ctx.fs_ops);
    match ignore.needs_change() {
        Ok(false) => {}
        Ok(true) if ctx.dry_run => {
            ctx.log
                .dry_run(&format!("would update: {}", ignore.description()));
        }
        Ok(true) => match ignore.apply() {
            Ok(_) => ctx
                .log
                .info(&format!("updated: {}", ignore.description())),
            Err(e) => ctx.log.warn(&format!("{e:#}")),
        },
        Err(e) => ctx.log.warn(&format!("{e:#}")),
    }
}
