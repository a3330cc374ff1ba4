//! YAML configuration for decorator defaults and record sinks.
//!
//! ```yaml
//! decorator:
//!   level: WARNING
//!   message: example-param
//! sink:
//!   kind: jsonl
//!   path: records.jsonl
//!   shared: false
//! ```
//!
//! Every section is optional. Command-line flags are layered on top with
//! [`Config::apply_overrides`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, LogwrapError};
use crate::severity::Severity;
use crate::sink::{JsonlSink, RecordWriter, SharedSink, SinkRegistry, TracingSink};
use crate::wrapper::Decorator;

/// Message used when neither the file nor the command line names one.
pub const DEFAULT_MESSAGE: &str = "example-param";

/// Scope label for sinks shared by every scope.
const SHARED_SCOPE: &str = "shared";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Defaults for new wraps.
    pub decorator: DecoratorConfig,
    /// Where records go.
    pub sink: SinkConfig,
}

/// Decorator defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecoratorConfig {
    /// Severity of new wraps.
    pub level: Severity,
    /// Message of new wraps, before the function name is prefixed.
    pub message: String,
}

impl Default for DecoratorConfig {
    fn default() -> Self {
        Self {
            level: Severity::Warning,
            message: DEFAULT_MESSAGE.to_owned(),
        }
    }
}

/// Sink backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Forward to the `tracing` subscriber.
    #[default]
    Tracing,
    /// Append JSON lines to a file.
    Jsonl,
}

/// Sink selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SinkConfig {
    /// Backend.
    pub kind: SinkKind,
    /// Output file, required for [`SinkKind::Jsonl`].
    pub path: Option<PathBuf>,
    /// Use one sink for every scope instead of one per scope.
    pub shared: bool,
}

impl Config {
    /// Reads and validates the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if the file cannot be read,
    /// [`ConfigError::ParseError`] on malformed YAML, and
    /// [`ConfigError::InvalidValue`] if validation fails.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::MissingFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&raw, path)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parses and validates YAML text; `origin` is only used in errors.
    ///
    /// Blank input yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] or [`ConfigError::InvalidValue`].
    pub fn from_yaml(raw: &str, origin: &Path) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(raw).map_err(|e| ConfigError::ParseError {
            path: origin.to_path_buf(),
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a JSONL sink has no path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sink.kind == SinkKind::Jsonl && self.sink.path.is_none() {
            return Err(ConfigError::InvalidValue {
                field: "sink.path".to_owned(),
                value: String::new(),
                expected: "a file path when sink.kind is jsonl".to_owned(),
            });
        }
        Ok(())
    }

    /// Layers command-line values over the file.
    ///
    /// A records file switches the sink to JSONL.
    pub fn apply_overrides(
        &mut self,
        level: Option<Severity>,
        message: Option<String>,
        records_file: Option<PathBuf>,
    ) {
        if let Some(level) = level {
            self.decorator.level = level;
        }
        if let Some(message) = message {
            self.decorator.message = message;
        }
        if let Some(path) = records_file {
            self.sink.kind = SinkKind::Jsonl;
            self.sink.path = Some(path);
        }
    }

    /// Builds a decorator with these defaults and this sink selection.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the sink is invalid, or an I/O
    /// error if the records file cannot be created.
    pub fn build_decorator(&self) -> Result<Decorator, LogwrapError> {
        self.validate()?;
        let DecoratorConfig { level, message } = &self.decorator;

        let decorator = match (self.sink.kind, self.sink.shared) {
            (SinkKind::Tracing, false) => Decorator::tracing(*level, message.clone()),
            (SinkKind::Tracing, true) => Decorator::new(
                *level,
                message.clone(),
                SharedSink::new(Arc::new(TracingSink::new(SHARED_SCOPE))),
            ),
            (SinkKind::Jsonl, shared) => {
                let writer = Arc::new(self.open_records()?);
                if shared {
                    Decorator::new(
                        *level,
                        message.clone(),
                        SharedSink::new(Arc::new(JsonlSink::new(writer, SHARED_SCOPE))),
                    )
                } else {
                    Decorator::new(*level, message.clone(), SinkRegistry::jsonl(writer))
                }
            }
        };
        Ok(decorator)
    }

    fn open_records(&self) -> Result<RecordWriter, LogwrapError> {
        let path = self.sink.path.as_deref().ok_or_else(|| ConfigError::InvalidValue {
            field: "sink.path".to_owned(),
            value: String::new(),
            expected: "a file path when sink.kind is jsonl".to_owned(),
        })?;
        Ok(RecordWriter::from_file(path)?)
    }
}
