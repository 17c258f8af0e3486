pub mod errors;
pub mod logger;

pub use errors::{Diagnostic, DiagnosticSeverity, emit_diagnostics, write_diagnostics};
pub use logger::{
    ConsoleSink, LogSink, Logger, NullSink, Severity, TracingSink, WriterSink, init_logging,
};
