#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the full setup run.
//!
//! Each test drives a [`Runtime`](commitkit::lifecycle::Runtime) against a
//! temporary package and project on the real filesystem, with a recording
//! executor standing in for npm and the hook manager.

mod common;

use std::sync::Arc;

use commitkit::config::{Config, ShellCommand};
use commitkit::logging::PhaseStatus;

use common::*;

const INSTALL: &str = "npm install -D husky @commitlint/cli @commitlint/config-conventional";
const INIT: &str = "npx husky init";
const CLEANUP: &str = "npm pkg delete scripts.prepare";

// ---------------------------------------------------------------------------
// Fresh project
// ---------------------------------------------------------------------------

#[test]
fn fresh_project_phases() {
    let pkg = TestPackage::new();
    let executor = Arc::new(RecordingExecutor::default());
    let log = Arc::new(RecordingLog::default());

    pkg.runtime(Config::default(), &executor, &log)
        .run()
        .unwrap();

    insta::assert_snapshot!("fresh_project_phases", log.summary().join("\n"));
}

#[test]
fn fresh_project_runs_install_init_and_cleanup_in_project() {
    let pkg = TestPackage::new();
    let executor = Arc::new(RecordingExecutor::default());
    let log = Arc::new(RecordingLog::default());

    let mut runtime = pkg.runtime(Config::default(), &executor, &log);
    runtime.run().unwrap();

    assert_eq!(executor.commands(), vec![INSTALL, INIT, CLEANUP]);
    assert!(
        executor
            .dirs()
            .iter()
            .all(|d| d.as_path() == pkg.project_path())
    );
    assert!(runtime.state().is_empty());
}

#[test]
fn fresh_project_receives_templates() {
    let pkg = TestPackage::new();
    let executor = Arc::new(RecordingExecutor::default());
    let log = Arc::new(RecordingLog::default());

    pkg.runtime(Config::default(), &executor, &log)
        .run()
        .unwrap();

    for (name, contents) in HOOKS {
        assert_eq!(
            pkg.read_project(&format!(".husky/{name}")).as_deref(),
            Some(*contents),
            "hook {name}"
        );
    }
    assert_eq!(
        pkg.read_project(".commitlintrc.json").as_deref(),
        Some(LINT_CONFIG)
    );
    assert_eq!(
        pkg.read_project(".gitignore").as_deref(),
        Some("node_modules/\n")
    );
}

#[cfg(unix)]
#[test]
fn copied_hooks_are_executable() {
    use std::os::unix::fs::PermissionsExt;

    let pkg = TestPackage::new();
    let executor = Arc::new(RecordingExecutor::default());
    let log = Arc::new(RecordingLog::default());
    pkg.runtime(Config::default(), &executor, &log)
        .run()
        .unwrap();

    let mode = std::fs::metadata(pkg.project_file(".husky/pre-commit"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o755);
}

#[cfg(unix)]
#[test]
fn matching_hook_without_execute_bits_is_made_executable() {
    use std::os::unix::fs::PermissionsExt;

    let pkg = TestPackage::new();
    let hook = pkg.project_file(".husky/pre-commit");
    std::fs::create_dir_all(hook.parent().unwrap()).unwrap();
    std::fs::write(&hook, HOOKS[2].1).unwrap();
    std::fs::set_permissions(&hook, std::fs::Permissions::from_mode(0o644)).unwrap();
    let executor = Arc::new(RecordingExecutor::default());
    let log = Arc::new(RecordingLog::default());

    pkg.runtime(Config::default(), &executor, &log)
        .run()
        .unwrap();

    let mode = std::fs::metadata(&hook).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
    assert!(!log.contains("skipped: pre-commit already up to date"));
}

// ---------------------------------------------------------------------------
// Pre-existing hooks
// ---------------------------------------------------------------------------

#[test]
fn existing_hooks_directory_skips_init_and_cleanup() {
    let pkg = TestPackage::new();
    std::fs::create_dir_all(pkg.project_file(".husky")).unwrap();
    let executor = Arc::new(RecordingExecutor::default());
    let log = Arc::new(RecordingLog::default());

    pkg.runtime(Config::default(), &executor, &log)
        .run()
        .unwrap();

    assert_eq!(executor.commands(), vec![INSTALL]);
    assert!(log.contains("skipped: deinitialization"));
    assert_eq!(
        log.statuses(),
        vec![PhaseStatus::Ok, PhaseStatus::Ok, PhaseStatus::Skipped]
    );
    assert!(pkg.read_project(".husky/commit-msg").is_some());
}

#[test]
fn second_run_leaves_hooks_alone() {
    let pkg = TestPackage::new();
    let executor = Arc::new(RecordingExecutor::default());

    pkg.runtime(Config::default(), &executor, &Arc::new(RecordingLog::default()))
        .run()
        .unwrap();

    let log = Arc::new(RecordingLog::default());
    pkg.runtime(Config::default(), &executor, &log)
        .run()
        .unwrap();

    assert_eq!(executor.commands(), vec![INSTALL, INIT, CLEANUP, INSTALL]);
    for hook in ["commit-msg", "pre-commit", "pre-push"] {
        assert!(
            log.contains(&format!("skipped: {hook} already up to date")),
            "{hook} was not skipped"
        );
    }
    assert!(log.summary()[1].contains("0 copied, 5 up to date"));
}

#[test]
fn locally_edited_hook_is_restored() {
    let pkg = TestPackage::new();
    std::fs::create_dir_all(pkg.project_file(".husky")).unwrap();
    std::fs::write(pkg.project_file(".husky/pre-commit"), "echo edited\n").unwrap();
    let executor = Arc::new(RecordingExecutor::default());
    let log = Arc::new(RecordingLog::default());

    pkg.runtime(Config::default(), &executor, &log)
        .run()
        .unwrap();

    assert_eq!(
        pkg.read_project(".husky/pre-commit").as_deref(),
        Some(HOOKS[2].1)
    );
}

// ---------------------------------------------------------------------------
// Roots and configuration
// ---------------------------------------------------------------------------

#[test]
fn package_inside_project_skips_install() {
    let project = tempfile::tempdir().unwrap();
    write_templates(project.path());
    let executor = Arc::new(RecordingExecutor::default());
    let log = Arc::new(RecordingLog::default());

    runtime_for(
        Config::default(),
        project.path(),
        project.path(),
        &executor,
        &log,
    )
    .run()
    .unwrap();

    assert_eq!(executor.commands(), vec![INIT, CLEANUP]);
    assert!(log.contains("dev dependencies already installed, skipping"));
}

#[test]
fn shipped_templates_are_copied() {
    let project = tempfile::tempdir().unwrap();
    let executor = Arc::new(RecordingExecutor::default());
    let log = Arc::new(RecordingLog::default());

    runtime_for(
        Config::default(),
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")),
        project.path(),
        &executor,
        &log,
    )
    .run()
    .unwrap();

    for hook in Config::default().hook_files {
        assert!(
            project.path().join(".husky").join(&hook).is_file(),
            "missing {hook}"
        );
    }
    let lint = std::fs::read_to_string(project.path().join(".commitlintrc.json")).unwrap();
    assert!(lint.contains("@commitlint/config-conventional"));
}

#[test]
fn toml_config_selects_hooks_and_commands() {
    let pkg = TestPackage::new();
    let config = Config::from_toml(
        r#"
hook_files = ["commit-msg"]

[commands]
install = { command = "pnpm add -D husky" }
init = { command = "npx husky init" }
cleanup = []
"#,
    )
    .unwrap();
    let executor = Arc::new(RecordingExecutor::default());
    let log = Arc::new(RecordingLog::default());

    pkg.runtime(config, &executor, &log).run().unwrap();

    assert_eq!(executor.commands(), vec!["pnpm add -D husky", INIT]);
    assert!(pkg.read_project(".husky/commit-msg").is_some());
    assert!(pkg.read_project(".husky/pre-commit").is_none());
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn install_failure_aborts_before_any_file_is_written() {
    let pkg = TestPackage::new();
    let executor = Arc::new(RecordingExecutor::failing_on(INSTALL));
    let log = Arc::new(RecordingLog::default());

    let mut runtime = pkg.runtime(Config::default(), &executor, &log);
    let err = runtime.run().unwrap_err();

    assert!(err.to_string().contains(INSTALL), "got: {err}");
    assert_eq!(executor.commands(), vec![INSTALL]);
    assert!(pkg.read_project(".commitlintrc.json").is_none());
    assert_eq!(log.statuses(), vec![PhaseStatus::Failed]);
    assert!(runtime.state().is_empty());
}

#[test]
fn cleanup_failure_fails_the_run_after_files_are_copied() {
    let pkg = TestPackage::new();
    let executor = Arc::new(RecordingExecutor::failing_on(CLEANUP));
    let log = Arc::new(RecordingLog::default());

    let mut runtime = pkg.runtime(Config::default(), &executor, &log);
    assert!(runtime.run().is_err());

    assert!(pkg.read_project(".husky/pre-push").is_some());
    assert_eq!(log.statuses()[2], PhaseStatus::Failed);
    assert!(runtime.state().is_empty());
}

#[test]
fn missing_hook_template_is_a_warning() {
    let pkg = TestPackage::new();
    std::fs::remove_file(pkg.package.path().join("templates/husky/pre-push")).unwrap();
    let executor = Arc::new(RecordingExecutor::default());
    let log = Arc::new(RecordingLog::default());

    pkg.runtime(Config::default(), &executor, &log)
        .run()
        .unwrap();

    assert!(log.contains("warn: hook template \"pre-push\" not found, skipping"));
    assert!(pkg.read_project(".husky/pre-commit").is_some());
}

#[test]
fn empty_install_command_is_rejected_up_front() {
    let pkg = TestPackage::new();
    let mut config = Config::default();
    config.commands.install = ShellCommand::new("  ");
    let log = Arc::new(RecordingLog::default());

    let result = commitkit::lifecycle::Context::new(
        config,
        pkg.package.path(),
        pkg.project_path(),
        Arc::clone(&log) as Arc<dyn commitkit::logging::Log>,
        Arc::new(RecordingExecutor::default()),
    );

    assert!(result.is_err());
    assert!(pkg.read_project(".husky").is_none());
}

// ---------------------------------------------------------------------------
// Dry run
// ---------------------------------------------------------------------------

#[test]
fn dry_run_touches_nothing() {
    let pkg = TestPackage::new();
    let executor = Arc::new(RecordingExecutor::default());
    let log = Arc::new(RecordingLog::default());

    let ctx = commitkit::lifecycle::Context::new(
        Config::default(),
        pkg.package.path(),
        pkg.project_path(),
        Arc::clone(&log) as Arc<dyn commitkit::logging::Log>,
        Arc::clone(&executor) as Arc<dyn commitkit::exec::Executor>,
    )
    .unwrap()
    .with_dry_run(true);
    commitkit::lifecycle::Runtime::new(ctx).run().unwrap();

    assert!(executor.commands().is_empty());
    assert!(!pkg.project_file(".husky").exists());
    assert!(!pkg.project_file(".gitignore").exists());
    assert!(log.contains(&format!("would run: {INSTALL}")));
    assert!(log.statuses().iter().all(|s| *s == PhaseStatus::DryRun));
}
