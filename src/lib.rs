//! `logwrap` - function instrumentation with live log controls
//!
//! Wrap a function once with a [`Decorator`](wrapper::Decorator) and every
//! call emits a leveled record to a [`Sink`](sink::Sink) before running. The
//! record's severity and message stay adjustable on the wrapped value
//! without rewrapping.
//!
//! Companion utilities cover the other two halves of the picture: a map that
//! answers misses through a hook ([`fallback`]) and a cause-chain printer for
//! errors that are caught only to be shown ([`report`]).

pub mod cli;
pub mod config;
pub mod error;
pub mod fallback;
pub mod observability;
pub mod report;
pub mod severity;
pub mod sink;
pub mod wrapper;

pub use severity::Severity;
pub use sink::{Sink, SinkProvider};
pub use wrapper::{Decorator, FnIdentity, Wrapped, make_decorator};
