use std::fs;
use std::io;
use std::sync::Arc;

use ilex::utils::{LogSink, Logger, NullSink, Severity, WriterSink};

struct BrokenSink;

impl LogSink for BrokenSink {
    fn write(&self, _severity: Severity, _message: &str) -> io::Result<()> {
        Err(io::Error::other("sink is closed"))
    }
}

fn memory_logger(verbose: bool) -> (Logger, Arc<WriterSink<Vec<u8>>>) {
    let sink = Arc::new(WriterSink::new(Vec::new()));
    let logger = Logger::new(Arc::clone(&sink)).with_verbose(verbose);
    (logger, sink)
}

#[test]
fn quiet_logger_only_reports_errors_and_fatals() {
    let (logger, sink) = memory_logger(false);

    logger.info("starting");
    logger.debug("cursor at 3");
    logger.warning("odd byte");
    logger.error("unknown token `$`");
    logger.fatal("giving up");

    assert_eq!(
        sink.contents(),
        "[ERROR] unknown token `$`\n[FATAL] giving up\n"
    );
}

#[test]
fn verbose_logger_reports_every_severity() {
    let (logger, sink) = memory_logger(true);

    logger.info("one");
    logger.debug("two");
    logger.warning("three");
    logger.log(Severity::Error, format_args!("{} tokens", 4));

    assert_eq!(
        sink.contents(),
        "[INFO] one\n[DEBUG] two\n[WARNING] three\n[ERROR] 4 tokens\n"
    );
}

#[test]
fn file_sink_appends_lines() -> anyhow::Result<()> {
    let dir = tempfile::Builder::new().prefix("ilex-log-test").tempdir()?;
    let path = dir.path().join("ilex.log");

    Logger::new(WriterSink::append_to(&path)?).error("first");
    Logger::new(WriterSink::append_to(&path)?).error("second");

    assert_eq!(fs::read_to_string(&path)?, "[ERROR] first\n[ERROR] second\n");
    Ok(())
}

#[test]
fn failing_sink_does_not_panic() {
    let logger = Logger::new(BrokenSink).with_verbose(true);
    logger.info("lost");
    logger.fatal("also lost");
}

#[test]
fn null_sink_accepts_everything() {
    let logger = Logger::new(NullSink).with_verbose(true);
    assert!(logger.enabled(Severity::Debug));
    logger.debug("ignored");
    assert!(NullSink.write(Severity::Fatal, "ignored").is_ok());
}

#[test]
fn severities_are_ordered_by_urgency() {
    assert!(Severity::Info < Severity::Debug);
    assert!(Severity::Warning < Severity::Error);
    assert!(Severity::Error < Severity::Fatal);
    assert!(!Severity::Warning.always_reported());
    assert!(Severity::Fatal.always_reported());
    assert_eq!(Severity::Warning.to_string(), "WARNING");
}
