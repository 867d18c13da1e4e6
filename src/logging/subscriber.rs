//! Tracing subscriber: console formatting, the per-command log file, and
//! global initialisation.
use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;

use super::utils::{clock, log_file_path, strip_ansi};

const STAGE: &str = "commitkit::stage";
const DRY_RUN: &str = "commitkit::dry_run";

/// Collects the `message` field of an event.
#[derive(Default)]
struct MessageVisitor(String);

impl tracing::field::Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            value.clone_into(&mut self.0);
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

fn message(event: &tracing::Event<'_>) -> String {
    let mut visitor = MessageVisitor::default();
    event.record(&mut visitor);
    visitor.0
}

/// Layer appending every event to a plain-text log file.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Log file layer for `command`; `None` when no log directory is usable.
    pub(super) fn new(command: &str) -> Option<Self> {
        Self::open(&log_file_path(command)?)
    }

    /// Start a fresh log at `path` with a one-line run header.
    pub(super) fn open(path: &Path) -> Option<Self> {
        let started = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        let header = format!("# commitkit {} started {started}\n", env!("CARGO_PKG_VERSION"));
        fs::write(path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }

    fn line(level: Level, target: &str, msg: &str) -> String {
        let tag = match level {
            Level::ERROR => "[error] ",
            Level::WARN => "[warn] ",
            Level::DEBUG | Level::TRACE => "[debug] ",
            Level::INFO if target == DRY_RUN => "[dry run] ",
            Level::INFO if target == STAGE => return format!("[{}] ==> {msg}", clock()),
            _ => "",
        };
        format!("[{}]     {tag}{msg}", clock())
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let meta = event.metadata();
        let line = Self::line(*meta.level(), meta.target(), &strip_ansi(&message(event)));
        if let Ok(mut file) = self.file.lock() {
            writeln!(file, "{line}").ok();
        }
    }
}

/// Console formatter: `==>` stage headers, coloured warnings and errors,
/// `[DRY RUN]` actions, dimmed debug output.
struct ConsoleFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let msg = message(event);
        match (*meta.level(), meta.target()) {
            (Level::ERROR, _) => writeln!(writer, "\x1b[31mERROR\x1b[0m {msg}"),
            (Level::WARN, _) => writeln!(writer, "\x1b[33mWARN\x1b[0m  {msg}"),
            (Level::INFO, STAGE) => writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
            (Level::INFO, DRY_RUN) => writeln!(writer, "  \x1b[33m[DRY RUN]\x1b[0m {msg}"),
            (Level::INFO, _) => writeln!(writer, "  {msg}"),
            _ => writeln!(writer, "  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Where console log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleOutput {
    /// Info and below to stdout, warnings and errors to stderr.
    Split,
    /// Everything to stderr, leaving stdout to the command's own output.
    Stderr,
}

/// Initialise the global [`tracing`] subscriber.
///
/// Console output is routed per `output`; every event at `DEBUG` and above
/// is also appended to `$XDG_CACHE_HOME/commitkit/<command>.log`.  Must be
/// called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool, command: &str, output: ConsoleOutput) {
    use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt as _};
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let make_writer = match output {
        ConsoleOutput::Split => BoxMakeWriter::new(
            std::io::stderr
                .with_max_level(Level::WARN)
                .and(std::io::stdout.with_min_level(Level::INFO)),
        ),
        ConsoleOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
    };

    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter)
        .with_writer(make_writer)
        .with_filter(console_level);

    let file_layer = FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
