//! Sink resolution by declaring scope.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::{JsonlSink, RecordWriter, Sink, TracingSink};

/// Resolves the sink a wrapped function reports to.
///
/// Called once per wrap with the target's declaring scope (its module path).
pub trait SinkProvider: Send + Sync {
    /// Returns the sink for `scope`.
    fn sink_for(&self, scope: &str) -> Arc<dyn Sink>;
}

impl<P: SinkProvider + ?Sized> SinkProvider for Arc<P> {
    fn sink_for(&self, scope: &str) -> Arc<dyn Sink> {
        (**self).sink_for(scope)
    }
}

type SinkFactory = Box<dyn Fn(&str) -> Arc<dyn Sink> + Send + Sync>;

/// Caches one sink per scope.
///
/// The first wrap in a scope builds its sink with the registry's factory;
/// later wraps in the same scope get that same sink back, so functions
/// declared together share one destination and never duplicate it.
pub struct SinkRegistry {
    factory: SinkFactory,
    sinks: Mutex<HashMap<String, Arc<dyn Sink>>>,
}

impl std::fmt::Debug for SinkRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkRegistry")
            .field("scopes", &self.scopes())
            .finish_non_exhaustive()
    }
}

impl SinkRegistry {
    /// Creates a registry that builds missing sinks with `factory`.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&str) -> Arc<dyn Sink> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            sinks: Mutex::new(HashMap::new()),
        }
    }

    /// A registry of [`TracingSink`]s tagged with their scope.
    #[must_use]
    pub fn tracing() -> Self {
        Self::new(|scope| -> Arc<dyn Sink> { Arc::new(TracingSink::new(scope)) })
    }

    /// A registry of [`JsonlSink`]s that all feed `writer`.
    #[must_use]
    pub fn jsonl(writer: Arc<RecordWriter>) -> Self {
        Self::new(move |scope| -> Arc<dyn Sink> {
            Arc::new(JsonlSink::new(Arc::clone(&writer), scope))
        })
    }

    /// Scopes that have a sink, sorted.
    #[must_use]
    pub fn scopes(&self) -> Vec<String> {
        let sinks = self.sinks.lock().unwrap_or_else(PoisonError::into_inner);
        let mut scopes: Vec<String> = sinks.keys().cloned().collect();
        scopes.sort();
        scopes
    }

    /// Number of distinct sinks built so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no sink has been built yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SinkProvider for SinkRegistry {
    fn sink_for(&self, scope: &str) -> Arc<dyn Sink> {
        let mut sinks = self.sinks.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(sink) = sinks.get(scope) {
            return Arc::clone(sink);
        }

        tracing::debug!(scope, "creating sink for new scope");
        let sink = (self.factory)(scope);
        sinks.insert(scope.to_owned(), Arc::clone(&sink));
        sink
    }
}

/// Hands every scope the same sink.
#[derive(Clone)]
pub struct SharedSink(Arc<dyn Sink>);

impl std::fmt::Debug for SharedSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedSink").finish_non_exhaustive()
    }
}

impl SharedSink {
    /// Wraps `sink` so it is returned for any scope.
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self(sink)
    }
}

impl SinkProvider for SharedSink {
    fn sink_for(&self, _scope: &str) -> Arc<dyn Sink> {
        Arc::clone(&self.0)
    }
}
