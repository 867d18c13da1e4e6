//! Logging infrastructure for structured console and file output.

mod logger;
mod subscriber;
mod types;
mod utils;

pub use logger::Logger;
pub use subscriber::{ConsoleOutput, init_subscriber};
pub use types::{Log, PhaseEntry, PhaseStatus};

/// Create a Logger backed by an isolated per-thread tracing subscriber
/// with a [`FileLayer`](subscriber::FileLayer) writing into a temp dir, so
/// that tracing events emitted by logger methods reach the log file.
///
/// Returns a [`tracing::dispatcher::DefaultGuard`] that must be kept alive
/// for the duration of the test.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub(crate) fn isolated_logger() -> (Logger, tempfile::TempDir, tracing::dispatcher::DefaultGuard) {
    use tracing_subscriber::{Layer as _, filter::LevelFilter, layer::SubscriberExt as _};
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let path = tmp.path().join("test.log");
    let file_layer = subscriber::FileLayer::open(&path).expect("failed to create file layer");
    let log = Logger::with_log_file(Some(path));
    let subscriber =
        tracing_subscriber::registry().with(file_layer.with_filter(LevelFilter::DEBUG));
    let guard = tracing::dispatcher::set_default(&tracing::Dispatch::new(subscriber));
    (log, tmp, guard)
}

/// In-memory [`Log`] used by unit tests to assert on emitted messages.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemoryLog {
    lines: std::sync::Mutex<Vec<String>>,
    phases: std::sync::Mutex<Vec<PhaseEntry>>,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl MemoryLog {
    /// Every message so far, prefixed with its level (`info: ...`).
    pub(crate) fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("memory log poisoned").clone()
    }

    /// Returns `true` if any line contains `needle`.
    pub(crate) fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|l| l.contains(needle))
    }

    /// Recorded phase entries.
    pub(crate) fn phases(&self) -> Vec<PhaseEntry> {
        self.phases.lock().expect("memory log poisoned").clone()
    }

    fn push(&self, level: &str, msg: &str) {
        self.lines
            .lock()
            .expect("memory log poisoned")
            .push(format!("{level}: {msg}"));
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl Log for MemoryLog {
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
            .expect("memory log poisoned")
            .push(PhaseEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
    }
}
