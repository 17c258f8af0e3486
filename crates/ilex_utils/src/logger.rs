//! Severity-leveled logging through a pluggable sink.
//!
//! A [`Logger`] decides *whether* a message is reported; a [`LogSink`] decides
//! *where* it goes. Console colors are one sink among others rather than a
//! compile-time choice.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the `tracing` filter directives.
pub const LOG_ENV: &str = "ILEX_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Debug,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// Errors and fatals are reported even when the logger is not verbose.
    pub fn always_reported(self) -> bool {
        matches!(self, Severity::Error | Severity::Fatal)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Destination for formatted log lines. `message` carries no trailing newline.
pub trait LogSink: Send + Sync {
    fn write(&self, severity: Severity, message: &str) -> io::Result<()>;
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn write(&self, severity: Severity, message: &str) -> io::Result<()> {
        (**self).write(severity, message)
    }
}

/// Colorized lines on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write(&self, severity: Severity, message: &str) -> io::Result<()> {
        let line = match severity {
            Severity::Info => message.white(),
            Severity::Debug => message.cyan(),
            Severity::Warning => message.yellow(),
            Severity::Error => message.red(),
            Severity::Fatal => message.white().on_red(),
        };
        writeln!(io::stderr().lock(), "{line}")
    }
}

/// Plain `[LEVEL] message` lines on any writer, typically a log file.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl WriterSink<File> {
    /// Appends to the file at `path`, creating it if needed.
    pub fn append_to(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl WriterSink<Vec<u8>> {
    /// Everything written so far, for in-memory sinks.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.writer.lock()).into_owned()
    }
}

impl<W: Write + Send> LogSink for WriterSink<W> {
    fn write(&self, severity: Severity, message: &str) -> io::Result<()> {
        let mut writer = self.writer.lock();
        writeln!(writer, "[{}] {message}", severity.label())?;
        writer.flush()
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LogSink for NullSink {
    fn write(&self, _severity: Severity, _message: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Forwards messages as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, severity: Severity, message: &str) -> io::Result<()> {
        match severity {
            Severity::Info => tracing::info!("{message}"),
            Severity::Debug => tracing::debug!("{message}"),
            Severity::Warning => tracing::warn!("{message}"),
            Severity::Error => tracing::error!("{message}"),
            Severity::Fatal => tracing::error!(fatal = true, "{message}"),
        }
        Ok(())
    }
}

pub struct Logger {
    sink: Box<dyn LogSink>,
    verbose: bool,
}

impl Logger {
    /// Logger over `sink`. Verbose in debug builds, quiet in release builds.
    pub fn new(sink: impl LogSink + 'static) -> Self {
        Self {
            sink: Box::new(sink),
            verbose: cfg!(debug_assertions),
        }
    }

    pub fn console() -> Self {
        Self::new(ConsoleSink)
    }

    pub fn null() -> Self {
        Self::new(NullSink)
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn enabled(&self, severity: Severity) -> bool {
        self.verbose || severity.always_reported()
    }

    /// Hands `message` to the sink if `severity` is enabled. A failing sink is
    /// reported through `tracing` and otherwise ignored.
    pub fn log(&self, severity: Severity, message: impl fmt::Display) {
        if !self.enabled(severity) {
            return;
        }
        if let Err(err) = self.sink.write(severity, &message.to_string()) {
            tracing::warn!(%err, %severity, "log sink rejected a message");
        }
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(Severity::Info, message);
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Severity::Debug, message);
    }

    pub fn warning(&self, message: impl fmt::Display) {
        self.log(Severity::Warning, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(Severity::Error, message);
    }

    pub fn fatal(&self, message: impl fmt::Display) {
        self.log(Severity::Fatal, message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::console()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

/// Installs the global `tracing` subscriber, filtered by [`LOG_ENV`] and
/// defaulting to `warn`. Does nothing if a subscriber is already set.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
