//! Core logging types: phase entries, status, and the [`Log`] trait.

/// Phase execution result for summary reporting.
#[derive(Debug, Clone)]
pub struct PhaseEntry {
    /// Human-readable phase name.
    pub name: String,
    /// Final status of the phase.
    pub status: PhaseStatus,
    /// Optional detail message (e.g., skip reason or error description).
    pub message: Option<String>,
}

/// Status of a completed lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStatus {
    /// Phase completed and changed something (or had nothing to change).
    Ok,
    /// Phase decided there was nothing to do.
    Skipped,
    /// Phase ran in dry-run mode; no changes were applied.
    DryRun,
    /// Phase returned an error; the run stops here.
    Failed,
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) emits through `tracing`; tests use an
/// in-memory recorder so notices and warnings can be asserted.
pub trait Log: Send + Sync + std::fmt::Debug {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (suppressed on console unless verbose).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record a phase result for the summary.
    fn record_phase(&self, name: &str, status: PhaseStatus, message: Option<&str>);
}
