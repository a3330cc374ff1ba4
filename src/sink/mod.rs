//! Message sinks.
//!
//! A [`Sink`] is the collaborator a wrapped callable reports to: it receives
//! one leveled message per invocation. Sinks are resolved per declaring scope
//! through a [`SinkProvider`], normally a [`SinkRegistry`].

pub mod jsonl;
pub mod registry;

use std::sync::{Arc, Mutex, PoisonError};

use crate::severity::Severity;

pub use jsonl::{JsonlSink, Record, RecordWriter};
pub use registry::{SharedSink, SinkProvider, SinkRegistry};

/// `tracing` target used for every record a [`TracingSink`] emits.
pub const RECORD_TARGET: &str = "logwrap::record";

/// Destination for leveled messages.
pub trait Sink: Send + Sync {
    /// Records `message` at `severity`.
    ///
    /// Emission never fails from the caller's point of view; sinks drop
    /// whatever they cannot deliver.
    fn emit(&self, severity: Severity, message: &str);
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn emit(&self, severity: Severity, message: &str) {
        (**self).emit(severity, message);
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn emit(&self, severity: Severity, message: &str) {
        (**self).emit(severity, message);
    }
}

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

/// Forwards records to the global `tracing` dispatcher.
///
/// Each record becomes one event with target [`RECORD_TARGET`], a `scope`
/// field naming the declaring module and a `severity` field carrying the
/// original label (`tracing` has no level above `ERROR`).
#[derive(Debug, Clone)]
pub struct TracingSink {
    scope: String,
}

impl TracingSink {
    /// Creates a sink that tags its events with `scope`.
    #[must_use]
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
        }
    }

    /// The scope this sink tags events with.
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }
}

impl Sink for TracingSink {
    fn emit(&self, severity: Severity, message: &str) {
        let scope = self.scope.as_str();
        let label = severity.as_str();
        match severity {
            Severity::Debug => {
                tracing::debug!(target: RECORD_TARGET, scope, severity = label, "{message}");
            }
            Severity::Info => {
                tracing::info!(target: RECORD_TARGET, scope, severity = label, "{message}");
            }
            Severity::Warning => {
                tracing::warn!(target: RECORD_TARGET, scope, severity = label, "{message}");
            }
            Severity::Error | Severity::Critical => {
                tracing::error!(target: RECORD_TARGET, scope, severity = label, "{message}");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory capture
// ---------------------------------------------------------------------------

/// A record held by a [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    /// Severity the record was emitted at.
    pub severity: Severity,
    /// Message text.
    pub message: String,
}

impl CapturedRecord {
    /// Convenience constructor, mostly for assertions.
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Keeps every record in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<CapturedRecord>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all records captured so far.
    #[must_use]
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the most recent record, if any.
    #[must_use]
    pub fn last(&self) -> Option<CapturedRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Number of records captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing has been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discards all captured records.
    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Sink for MemorySink {
    fn emit(&self, severity: Severity, message: &str) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(CapturedRecord::new(severity, message));
    }
}
