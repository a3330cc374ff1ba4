//! Newline-delimited JSON record output.
//!
//! A [`RecordWriter`] serializes every record as one JSON line carrying a
//! monotonically increasing sequence number. [`JsonlSink`] binds a shared
//! writer to a declaring scope so several scopes can feed one file.

use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Sink;
use crate::severity::Severity;

/// One emitted record.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    /// When the record was emitted.
    pub timestamp: DateTime<Utc>,
    /// Declaring scope of the wrapped function.
    pub scope: String,
    /// Severity at emission time.
    pub severity: Severity,
    /// Message text.
    pub message: String,
}

/// Wraps a [`Record`] with its sequence number.
#[derive(Debug, Serialize)]
struct RecordEnvelope {
    sequence: u64,
    #[serde(flatten)]
    record: Record,
}

/// Thread-safe, buffered JSONL record writer.
///
/// Each call to [`write`](Self::write) takes the next sequence number under
/// the writer lock, so lines land in sequence order. Serialization and I/O
/// failures are dropped.
pub struct RecordWriter {
    writer: Mutex<BufWriter<Box<dyn Write + Send>>>,
    sequence: AtomicU64,
}

// Box<dyn Write> is not Debug.
impl std::fmt::Debug for RecordWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordWriter")
            .field("sequence", &self.sequence.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl RecordWriter {
    /// Creates a writer over `writer`.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(BufWriter::new(writer)),
            sequence: AtomicU64::new(0),
        }
    }

    /// Creates a writer that discards everything.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(Box::new(std::io::sink()))
    }

    /// Creates (or truncates) the file at `path` and writes to it.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self::new(Box::new(file)))
    }

    /// Writes `record` as one JSON line.
    pub fn write(&self, record: Record) {
        // The counter lives outside the lock; a panicked writer cannot corrupt it.
        let mut w = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst);
        let envelope = RecordEnvelope { sequence, record };

        if let Ok(line) = serde_json::to_string(&envelope) {
            let _ = writeln!(w, "{line}");
            let _ = w.flush();
        }
    }

    /// Number of records written so far.
    #[must_use]
    pub fn record_count(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }
}

/// A [`Sink`] that writes records for one scope to a shared [`RecordWriter`].
#[derive(Debug, Clone)]
pub struct JsonlSink {
    writer: Arc<RecordWriter>,
    scope: String,
}

impl JsonlSink {
    /// Binds `writer` to `scope`.
    #[must_use]
    pub fn new(writer: Arc<RecordWriter>, scope: impl Into<String>) -> Self {
        Self {
            writer,
            scope: scope.into(),
        }
    }
}

impl Sink for JsonlSink {
    fn emit(&self, severity: Severity, message: &str) {
        self.writer.write(Record {
            timestamp: Utc::now(),
            scope: self.scope.clone(),
            severity,
            message: message.to_owned(),
        });
    }
}
