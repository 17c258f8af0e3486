use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::json;
use tracing::debug;

use crate::config::Settings;
use crate::lexer::{tokenize, LexerConfig, Token, TokenKind};
use crate::utils::{emit_diagnostics, init_logging, Diagnostic, DiagnosticSeverity, Logger};

#[derive(Parser, Debug)]
#[command(name = "ilex", version, about = "Single-pass tokenizer CLI")]
pub struct IlexCli {
    #[arg(long, global = true)]
    /// Read lexer and logging settings from a TOML file.
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    /// Lex numbers as hexadecimal, overriding the config file.
    hex: bool,

    #[arg(long, global = true)]
    /// Report info, debug and warning messages.
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

impl IlexCli {
    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Prints every token of the specified file.
    Tokens {
        path: PathBuf,
        #[arg(long)]
        /// Emit the token stream as a JSON array.
        json: bool,
    },
    /// Reports bytes of the specified file that lex as unknown tokens.
    Check { path: PathBuf },
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = IlexCli::parse();
    execute(&cli)
}

pub fn execute(cli: &IlexCli) -> Result<()> {
    let session = Session::from_cli(cli)?;
    match &cli.command {
        Command::Tokens { path, json } => handle_tokens(&session, path, *json),
        Command::Check { path } => handle_check(&session, path),
    }
}

/// Settings resolved from the config file and the command line.
struct Session {
    lexer: LexerConfig,
    logger: Logger,
}

impl Session {
    fn from_cli(cli: &IlexCli) -> Result<Self> {
        let settings = Settings::load_or_default(cli.config.as_deref())?;

        let mut lexer = settings.lexer_config();
        lexer.hex_by_default |= cli.hex;

        let mut logger = settings.build_logger()?;
        if cli.verbose {
            logger = logger.with_verbose(true);
        }

        debug!(
            hex_by_default = lexer.hex_by_default,
            verbose = logger.is_verbose(),
            "session ready"
        );
        Ok(Self { lexer, logger })
    }
}

fn handle_tokens(session: &Session, path: &Path, as_json: bool) -> Result<()> {
    let source = read_source(path)?;
    let tokens = tokenize(&source, session.lexer);

    if as_json {
        let entries: Vec<_> = tokens.iter().map(token_json).collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for token in &tokens {
            println!("{}", token_line(token));
        }
    }

    session.logger.info(format!(
        "{}: {} tokens from {} bytes",
        path.display(),
        tokens.len(),
        source.len()
    ));
    Ok(())
}

fn handle_check(session: &Session, path: &Path) -> Result<()> {
    let source = read_source(path)?;
    let source_id = path.display().to_string();

    let diagnostics: Vec<Diagnostic> = tokenize(&source, session.lexer)
        .iter()
        .filter_map(|token| token_diagnostic(&source_id, &source, token))
        .collect();
    let errors = diagnostics
        .iter()
        .filter(|diagnostic| diagnostic.severity() == DiagnosticSeverity::Error)
        .count();

    if !diagnostics.is_empty() {
        emit_diagnostics(&diagnostics, &char_per_byte(&source));
    }

    if errors == 0 {
        println!("{} {}", "ok".green().bold(), path.display());
        session.logger.info(format!(
            "{source_id}: no unknown tokens, {} warning(s)",
            diagnostics.len()
        ));
        return Ok(());
    }

    session
        .logger
        .error(format!("{source_id}: {errors} unknown token(s)"));
    bail!("lexing failed");
}

fn read_source(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Unknown bytes are errors; NUL bytes lex fine but rarely belong in text input.
fn token_diagnostic(source_id: &str, source: &[u8], token: &Token<'_>) -> Option<Diagnostic> {
    match token.kind {
        TokenKind::Unknown => Some(
            Diagnostic::error(
                source_id,
                token.span,
                format!("unknown byte 0x{:02x}", source[token.span.start()]),
            )
            .with_label("not part of the token alphabet"),
        ),
        TokenKind::NullTerminator => Some(
            Diagnostic::warning(source_id, token.span, "NUL byte inside the input")
                .with_label("lexed as a null terminator")
                .with_help("the stream only ends at the end of the buffer"),
        ),
        _ => None,
    }
}

fn token_line(token: &Token<'_>) -> String {
    format!("{:<16} {:?} @ {}", token.kind.name(), token.text(), token.span)
}

fn token_json(token: &Token<'_>) -> serde_json::Value {
    json!({
        "kind": token.kind.name(),
        "text": token.text(),
        "start": token.span.start(),
        "end": token.span.end(),
    })
}

/// One char per byte, so byte spans double as the char offsets ariadne expects.
fn char_per_byte(source: &[u8]) -> String {
    source
        .iter()
        .map(|&byte| {
            if byte.is_ascii() {
                char::from(byte)
            } else {
                char::REPLACEMENT_CHARACTER
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Tokenizer;

    #[test]
    fn token_lines_show_kind_text_and_span() {
        let lines: Vec<String> = Tokenizer::from("width = 0x20;")
            .map(|token| token_line(&token))
            .collect();

        assert_eq!(
            lines,
            vec![
                "string           \"width\" @ 0..5",
                "equal            \"=\" @ 6..7",
                "hex              \"0x20\" @ 8..12",
                "semicolon        \";\" @ 12..13",
            ]
        );
    }

    #[test]
    fn token_json_carries_kind_text_and_offsets() {
        let token = Tokenizer::from("  -42").next_token();
        assert_eq!(
            token_json(&token),
            json!({ "kind": "decimal", "text": "-42", "start": 2, "end": 5 })
        );
    }

    #[test]
    fn unknown_bytes_are_errors_and_nul_bytes_warnings() {
        let source = b"a$\0";
        let severities: Vec<DiagnosticSeverity> = Tokenizer::new(source)
            .filter_map(|token| token_diagnostic("input.txt", source, &token))
            .map(|diagnostic| diagnostic.severity())
            .collect();

        assert_eq!(
            severities,
            vec![DiagnosticSeverity::Error, DiagnosticSeverity::Warning]
        );
    }
}
