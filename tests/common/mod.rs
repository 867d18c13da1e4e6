// Shared helpers for integration tests.
//
// Provides a temporary package (templates) and project pair plus recording
// implementations of the executor and logger seams, so each test can drive
// a full `Runtime` run against the real filesystem without spawning npm.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use commitkit::config::{Config, ShellCommand};
use commitkit::error::SetupError;
use commitkit::exec::{ExecResult, Executor};
use commitkit::lifecycle::{Context, Runtime};
use commitkit::logging::{Log, PhaseEntry, PhaseStatus};

/// Hook template contents written by [`TestPackage`].
pub const HOOKS: &[(&str, &str)] = &[
    ("_/husky.sh", "#!/usr/bin/env sh\n"),
    ("commit-msg", "#!/usr/bin/env sh\nnpx --no -- commitlint --edit \"$1\"\n"),
    ("pre-commit", "#!/usr/bin/env sh\nnpm test\n"),
    ("pre-push", "#!/usr/bin/env sh\nnpm run build\n"),
];

/// Lint config template contents written by [`TestPackage`].
pub const LINT_CONFIG: &str = "{\n  \"extends\": [\"@commitlint/config-conventional\"]\n}\n";

/// Executor that records each command and its working directory.
///
/// Running the configured init command creates `.husky/` in its working
/// directory, like the real hook manager does.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<(String, PathBuf)>>,
    fail_on: Option<String>,
}

impl RecordingExecutor {
    /// Fail (exit 1) when `command` is run.
    pub fn failing_on(command: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on: Some(command.to_string()),
        }
    }

    /// Command lines run so far, in order.
    pub fn commands(&self) -> Vec<String> {
        self.calls
            .lock()
            .expect("calls poisoned")
            .iter()
            .map(|(c, _)| c.clone())
            .collect()
    }

    /// Working directories, in call order.
    pub fn dirs(&self) -> Vec<PathBuf> {
        self.calls
            .lock()
            .expect("calls poisoned")
            .iter()
            .map(|(_, d)| d.clone())
            .collect()
    }
}

impl Executor for RecordingExecutor {
    fn run(&self, command: &ShellCommand, cwd: &Path) -> Result<ExecResult, SetupError> {
        self.calls
            .lock()
            .expect("calls poisoned")
            .push((command.command.clone(), cwd.to_path_buf()));
        if self.fail_on.as_deref() == Some(command.command.as_str()) {
            return Err(SetupError::Subprocess {
                command: command.command.clone(),
                code: 1,
                stderr: String::new(),
            });
        }
        if command.command == Config::default().commands.init.command {
            std::fs::create_dir_all(cwd.join(".husky")).expect("create .husky");
        }
        Ok(ExecResult {
            success: true,
            code: Some(0),
            ..ExecResult::default()
        })
    }
}

/// Logger that keeps every message and phase in memory.
#[derive(Debug, Default)]
pub struct RecordingLog {
    lines: Mutex<Vec<String>>,
    phases: Mutex<Vec<PhaseEntry>>,
}

impl RecordingLog {
    /// Every message so far, prefixed with its level.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("lines poisoned").clone()
    }

    /// Returns `true` if any message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|l| l.contains(needle))
    }

    /// Recorded phases rendered as `name: status (message)`.
    pub fn summary(&self) -> Vec<String> {
        self.phases
            .lock()
            .expect("phases poisoned")
            .iter()
            .map(|p| {
                let suffix = p
                    .message
                    .as_ref()
                    .map_or_else(String::new, |m| format!(" ({m})"));
                format!("{}: {:?}{suffix}", p.name, p.status)
            })
            .collect()
    }

    /// Status of every recorded phase, in order.
    pub fn statuses(&self) -> Vec<PhaseStatus> {
        self.phases
            .lock()
            .expect("phases poisoned")
            .iter()
            .map(|p| p.status)
            .collect()
    }

    fn push(&self, level: &str, msg: &str) {
        self.lines
            .lock()
            .expect("lines poisoned")
            .push(format!("{level}: {msg}"));
    }
}

impl Log for RecordingLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
    fn dry_run(&self, msg: &str) {
        self.push("dry_run", msg);
    }
    fn record_phase(&self, name: &str, status: PhaseStatus, message: Option<&str>) {
        self.phases
            .lock()
            .expect("phases poisoned")
            .push(PhaseEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
    }
}

/// A temporary package directory with templates and an empty project.
pub struct TestPackage {
    /// Package root holding `templates/`.
    pub package: tempfile::TempDir,
    /// Project root being set up.
    pub project: tempfile::TempDir,
}

impl TestPackage {
    /// Create a package with every default template and an empty project.
    pub fn new() -> Self {
        let package = tempfile::tempdir().expect("create package dir");
        let project = tempfile::tempdir().expect("create project dir");
        write_templates(package.path());
        Self { package, project }
    }

    /// Path to the project root.
    pub fn project_path(&self) -> &Path {
        self.project.path()
    }

    /// Path of `rel` inside the project.
    pub fn project_file(&self, rel: &str) -> PathBuf {
        self.project.path().join(rel)
    }

    /// Read `rel` inside the project, if it exists.
    pub fn read_project(&self, rel: &str) -> Option<String> {
        std::fs::read_to_string(self.project_file(rel)).ok()
    }

    /// Build a runtime over this package and project.
    pub fn runtime(
        &self,
        config: Config,
        executor: &Arc<RecordingExecutor>,
        log: &Arc<RecordingLog>,
    ) -> Runtime {
        runtime_for(
            config,
            self.package.path(),
            self.project.path(),
            executor,
            log,
        )
    }
}

/// Write the default templates under `<root>/templates`.
pub fn write_templates(root: &Path) {
    let hooks = root.join("templates/husky");
    for (name, contents) in HOOKS {
        let path = hooks.join(name);
        std::fs::create_dir_all(path.parent().expect("hook parent")).expect("create hook dir");
        std::fs::write(&path, contents).expect("write hook template");
    }
    let lint = root.join("templates/commitlint");
    std::fs::create_dir_all(&lint).expect("create lint dir");
    std::fs::write(lint.join(".commitlintrc.json"), LINT_CONFIG).expect("write lint config");
}

/// Build a runtime for arbitrary roots.
pub fn runtime_for(
    config: Config,
    package_root: &Path,
    project_root: &Path,
    executor: &Arc<RecordingExecutor>,
    log: &Arc<RecordingLog>,
) -> Runtime {
    let ctx = Context::new(
        config,
        package_root,
        project_root,
        Arc::clone(log) as Arc<dyn Log>,
        Arc::clone(executor) as Arc<dyn Executor>,
    )
    .expect("valid context");
    Runtime::new(ctx)
}
