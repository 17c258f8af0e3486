use std::io::{self, Write};

use ariadne::{Color, Label, Report, ReportKind, Source};
use ilex_span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// A message anchored to a byte range of a lexed buffer.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: DiagnosticSeverity,
    source_id: String,
    span: Span,
    message: String,
    label: Option<String>,
    help: Option<String>,
}

impl Diagnostic {
    pub fn new(
        severity: DiagnosticSeverity,
        source_id: impl Into<String>,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            source_id: source_id.into(),
            span,
            message: message.into(),
            label: None,
            help: None,
        }
    }

    pub fn error(source_id: impl Into<String>, span: Span, message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Error, source_id, span, message)
    }

    pub fn warning(source_id: impl Into<String>, span: Span, message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Warning, source_id, span, message)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn severity(&self) -> DiagnosticSeverity {
        self.severity
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    fn report_kind(&self) -> ReportKind<'static> {
        match self.severity {
            DiagnosticSeverity::Error => ReportKind::Error,
            DiagnosticSeverity::Warning => ReportKind::Warning,
        }
    }

    fn color(&self) -> Color {
        match self.severity {
            DiagnosticSeverity::Error => Color::Red,
            DiagnosticSeverity::Warning => Color::Yellow,
        }
    }

    fn report(&self) -> Report<'static, (String, std::ops::Range<usize>)> {
        let span: std::ops::Range<usize> = self.span.into();
        let mut label = Label::new((self.source_id.clone(), span.clone())).with_color(self.color());
        if let Some(text) = self.label() {
            label = label.with_message(text);
        }

        let mut report = Report::build(self.report_kind(), self.source_id.clone(), span.start)
            .with_message(&self.message)
            .with_label(label);
        if let Some(help) = self.help() {
            report = report.with_help(help);
        }
        report.finish()
    }
}

/// Renders `diagnostics` against `source` into `out`.
///
/// ariadne counts offsets in chars, so `source` must hold one char per byte of
/// the lexed buffer for spans to line up.
pub fn write_diagnostics(
    diagnostics: &[Diagnostic],
    source: &str,
    mut out: impl Write,
) -> io::Result<()> {
    for diagnostic in diagnostics {
        diagnostic.report().write(
            (diagnostic.source_id().to_owned(), Source::from(source)),
            &mut out,
        )?;
    }
    Ok(())
}

/// Prints `diagnostics` to stderr. Rendering failures are dropped.
pub fn emit_diagnostics(diagnostics: &[Diagnostic], source: &str) {
    for diagnostic in diagnostics {
        let _ = diagnostic
            .report()
            .eprint((diagnostic.source_id().to_owned(), Source::from(source)));
    }
}
