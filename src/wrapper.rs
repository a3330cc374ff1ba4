//! Instrumentation wrappers.
//!
//! A [`Decorator`] carries a default severity and message. Applying it to a
//! function yields a [`Wrapped`] callable that behaves exactly like the
//! function, emits one record to its sink before every invocation, and lets
//! the caller change the record's severity and message afterwards through
//! [`Wrapped::set_level`] and [`Wrapped::set_message`].
//!
//! ```
//! use std::sync::Arc;
//!
//! use logwrap::instrument;
//! use logwrap::severity::Severity;
//! use logwrap::sink::{MemorySink, SharedSink};
//! use logwrap::wrapper::make_decorator;
//!
//! fn add(a: i32, b: i32) -> i32 {
//!     a + b
//! }
//!
//! let records = Arc::new(MemorySink::new());
//! let log = make_decorator(Severity::Warning, "start", SharedSink::new(records.clone()));
//! let add = instrument!(log, add);
//!
//! assert_eq!(add.call((2, 3)), 5);
//! add.set_level(Severity::Critical);
//! add.set_message("resumed");
//! assert_eq!(add.call((4, 5)), 9);
//!
//! let last = records.last().unwrap();
//! assert_eq!(last.severity, Severity::Critical);
//! assert_eq!(last.message, "add - resumed");
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::severity::Severity;
use crate::sink::{Sink, SinkProvider, SinkRegistry};

// ============================================================================
// Identity
// ============================================================================

/// Externally visible identity of a wrapped function.
///
/// A [`Wrapped`] reports the identity of its target rather than its own, so
/// anything that introspects names sees the original function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FnIdentity {
    name: String,
    scope: String,
    doc: Option<String>,
}

impl FnIdentity {
    /// Creates an identity for the function `name` declared in `scope`.
    #[must_use]
    pub fn new(name: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: scope.into(),
            doc: None,
        }
    }

    /// Creates an identity from a fully qualified type name such as
    /// `app::math::add`.
    ///
    /// The last path segment becomes the name and everything before it the
    /// declaring scope. Generic arguments are dropped: `core::cmp::max<i32>`
    /// is `max` in `core::cmp`.
    #[must_use]
    pub fn from_type_name(type_name: &str) -> Self {
        let path = strip_generics(type_name);
        match path.rsplit_once("::") {
            Some((scope, name)) => Self::new(name, scope),
            None => Self::new(path, ""),
        }
    }

    /// Identity of the function item or function-like value `target`,
    /// read from its type name.
    #[must_use]
    pub fn of<F>(_target: &F) -> Self {
        Self::from_type_name(std::any::type_name::<F>())
    }

    /// Attaches documentation text.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declaring scope, usually a module path.
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Documentation text, if any was attached.
    #[must_use]
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }
}

impl fmt::Display for FnIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.scope, self.name)
    }
}

/// Removes `<...>` groups from a type path, leaving `->` arrows alone.
fn strip_generics(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut depth = 0usize;
    let mut prev = '\0';
    for c in path.chars() {
        match c {
            '<' => depth += 1,
            '>' if prev != '-' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
        prev = c;
    }
    out
}

/// Builds the [`FnIdentity`] of a function from its path.
///
/// The scope is the module the function is declared in, not the module the
/// macro is expanded in.
#[macro_export]
macro_rules! fn_identity {
    ($target:path) => {
        $crate::wrapper::FnIdentity::of(&$target)
    };
}

/// Applies a [`Decorator`] to a function, taking its identity from the
/// function's declaration.
///
/// `instrument!(log, math::add)` is `log.apply(fn_identity!(math::add), math::add)`.
#[macro_export]
macro_rules! instrument {
    ($decorator:expr, $target:path) => {{
        let target = $target;
        $decorator.apply($crate::wrapper::FnIdentity::of(&target), target)
    }};
}

// ============================================================================
// Invocation
// ============================================================================

/// Calls a function with its arguments packed in a tuple.
///
/// Implemented for every `Fn` taking up to eight arguments, so a
/// [`Wrapped`] can forward any argument list without knowing its shape.
pub trait Invoke<Args> {
    /// Value returned by the function.
    type Output;

    /// Calls the function with `args` unpacked.
    fn invoke(&self, args: Args) -> Self::Output;
}

macro_rules! impl_invoke {
    ($($ty:ident $var:ident),*) => {
        impl<Func, Out, $($ty,)*> Invoke<($($ty,)*)> for Func
        where
            Func: Fn($($ty),*) -> Out,
        {
            type Output = Out;

            fn invoke(&self, ($($var,)*): ($($ty,)*)) -> Out {
                self($($var),*)
            }
        }
    };
}

impl_invoke!();
impl_invoke!(A a);
impl_invoke!(A a, B b);
impl_invoke!(A a, B b, C c);
impl_invoke!(A a, B b, C c, D d);
impl_invoke!(A a, B b, C c, D d, E e);
impl_invoke!(A a, B b, C c, D d, E e, G g);
impl_invoke!(A a, B b, C c, D d, E e, G g, H h);
impl_invoke!(A a, B b, C c, D d, E e, G g, H h, I i);

// ============================================================================
// Wrapped callable
// ============================================================================

/// Joins a function name and a message the way every record is labelled.
fn join_message(name: &str, message: &str) -> String {
    format!("{name} - {message}")
}

struct Settings {
    severity: Severity,
    message: String,
}

/// A function instrumented by a [`Decorator`].
///
/// Calling it is equivalent to calling the target, plus one record emitted
/// beforehand at the current severity with the current message. Severity and
/// message are private; they change only through [`set_level`](Self::set_level)
/// and [`set_message`](Self::set_message), and only affect later calls.
pub struct Wrapped<F> {
    target: F,
    identity: FnIdentity,
    sink: Arc<dyn Sink>,
    settings: Mutex<Settings>,
}

impl<F> fmt::Debug for Wrapped<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapped")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl<F> Wrapped<F> {
    /// Emits the current record, then calls the target with `args`.
    ///
    /// The target's return value comes back untouched, `Err` included, and a
    /// panic unwinds straight through. The record is emitted either way.
    pub fn call<Args>(&self, args: Args) -> F::Output
    where
        F: Invoke<Args>,
    {
        let (severity, message) = {
            let settings = self.settings();
            (settings.severity, settings.message.clone())
        };
        self.sink.emit(severity, &message);
        self.target.invoke(args)
    }

    /// Sets the severity used from the next call on.
    pub fn set_level(&self, severity: Severity) {
        self.settings().severity = severity;
    }

    /// Sets the message used from the next call on.
    ///
    /// The function name is prefixed as at wrap time: `"<name> - <message>"`.
    pub fn set_message(&self, message: impl AsRef<str>) {
        let message = join_message(self.identity.name(), message.as_ref());
        self.settings().message = message;
    }

    /// The target's name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.identity.name()
    }

    /// The target's declaring scope.
    #[must_use]
    pub fn scope(&self) -> &str {
        self.identity.scope()
    }

    /// The target's documentation, if known.
    #[must_use]
    pub fn doc(&self) -> Option<&str> {
        self.identity.doc()
    }

    /// The target's full identity.
    #[must_use]
    pub const fn identity(&self) -> &FnIdentity {
        &self.identity
    }

    fn settings(&self) -> MutexGuard<'_, Settings> {
        // Two plain values; a panic elsewhere cannot leave them half-written.
        self.settings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// Factory
// ============================================================================

/// Produces [`Wrapped`] callables that share a default severity, a default
/// message and a sink provider.
///
/// Building a decorator has no side effects. Sinks are resolved when the
/// decorator is applied, from the target's declaring scope.
#[derive(Clone)]
pub struct Decorator {
    severity: Severity,
    message: String,
    sinks: Arc<dyn SinkProvider>,
}

impl fmt::Debug for Decorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decorator")
            .field("severity", &self.severity)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Creates a [`Decorator`] with the given defaults and sink provider.
pub fn make_decorator<P>(severity: Severity, message: impl Into<String>, sinks: P) -> Decorator
where
    P: SinkProvider + 'static,
{
    Decorator::new(severity, message, sinks)
}

impl Decorator {
    /// Creates a decorator with the given defaults and sink provider.
    pub fn new<P>(severity: Severity, message: impl Into<String>, sinks: P) -> Self
    where
        P: SinkProvider + 'static,
    {
        Self {
            severity,
            message: message.into(),
            sinks: Arc::new(sinks),
        }
    }

    /// A decorator whose sinks forward to `tracing`, one per scope.
    #[must_use]
    pub fn tracing(severity: Severity, message: impl Into<String>) -> Self {
        Self::new(severity, message, SinkRegistry::tracing())
    }

    /// Default severity given to new wraps.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Default message given to new wraps, before the name is prefixed.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Wraps `target`, known to callers as `identity`.
    pub fn apply<F>(&self, identity: FnIdentity, target: F) -> Wrapped<F> {
        let sink = self.sinks.sink_for(identity.scope());
        let message = join_message(identity.name(), &self.message);
        tracing::trace!(
            function = %identity,
            severity = %self.severity,
            "instrumented function"
        );

        Wrapped {
            target,
            identity,
            sink,
            settings: Mutex::new(Settings {
                severity: self.severity,
                message,
            }),
        }
    }
}
