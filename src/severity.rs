//! Ordered log severities.
//!
//! `Severity` is the level a [`Wrapped`](crate::wrapper::Wrapped) callable
//! emits its records at. Levels are totally ordered
//! (`Debug < Info < Warning < Error < Critical`) and print as their
//! conventional upper-case labels.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity of an emitted record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Diagnostic detail.
    #[serde(alias = "debug")]
    Debug,
    /// Routine information.
    #[serde(alias = "info")]
    Info,
    /// Something unexpected that does not stop the program.
    #[default]
    #[serde(alias = "warning", alias = "WARN", alias = "warn")]
    #[value(alias = "warn")]
    Warning,
    /// A failed operation.
    #[serde(alias = "error")]
    Error,
    /// A failure the program may not recover from.
    #[serde(alias = "critical", alias = "FATAL", alias = "fatal")]
    #[value(alias = "fatal")]
    Critical,
}

impl Severity {
    /// All severities in ascending order.
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Critical,
    ];

    /// Returns the conventional upper-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known severity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown severity '{0}' (expected DEBUG, INFO, WARNING, ERROR or CRITICAL)")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARNING" | "WARN" => Ok(Self::Warning),
            "ERROR" => Ok(Self::Error),
            "CRITICAL" | "FATAL" => Ok(Self::Critical),
            _ => Err(ParseSeverityError(s.to_owned())),
        }
    }
}
