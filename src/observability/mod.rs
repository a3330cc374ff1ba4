//! Observability module
//!
//! Global `tracing` subscriber setup for the `logwrap` binary. Library users
//! install their own subscriber; [`TracingSink`](crate::sink::TracingSink)
//! records then flow through it.

pub mod logging;

pub use logging::{LogFormat, LogSettings, init_logging, verbosity_to_directive};
