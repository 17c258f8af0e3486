use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::lexer::LexerConfig;
use crate::utils::{ConsoleSink, Logger, NullSink, TracingSink, WriterSink};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("log sink `file` needs a `path`")]
    MissingLogPath,
    #[error("failed to open log file {}: {source}", .path.display())]
    OpenLog { path: PathBuf, source: io::Error },
}

/// Contents of an `ilex.toml` file. Every section and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub lexer: LexerSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LexerSettings {
    pub hex_by_default: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    /// Unset means "verbose in debug builds only".
    pub verbose: Option<bool>,
    pub sink: SinkKind,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Console,
    File,
    Null,
    Tracing,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    pub fn lexer_config(&self) -> LexerConfig {
        LexerConfig {
            hex_by_default: self.lexer.hex_by_default,
        }
    }

    pub fn build_logger(&self) -> Result<Logger, ConfigError> {
        let logger = match self.log.sink {
            SinkKind::Console => Logger::new(ConsoleSink),
            SinkKind::Null => Logger::new(NullSink),
            SinkKind::Tracing => Logger::new(TracingSink),
            SinkKind::File => {
                let path = self.log.path.as_ref().ok_or(ConfigError::MissingLogPath)?;
                let sink = WriterSink::append_to(path).map_err(|source| ConfigError::OpenLog {
                    path: path.clone(),
                    source,
                })?;
                Logger::new(sink)
            }
        };

        Ok(match self.log.verbose {
            Some(verbose) => logger.with_verbose(verbose),
            None => logger,
        })
    }
}
