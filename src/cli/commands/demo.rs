//! Bundled demonstrations
//!
//! Each handler runs one short scenario top to bottom and prints what it
//! observes to stdout; records and warnings go through the log.

use std::io;

use thiserror::Error;

use crate::cli::args::{DecoratorArgs, FallbackArgs};
use crate::config::Config;
use crate::error::LogwrapError;
use crate::fallback::FallbackMap;
use crate::instrument;
use crate::report;

/// Argument passed on both calls of the decorator demonstration.
const DEMO_ARGUMENT: &str = "some args";

/// Echoes its argument.
fn somebuggyfunc(args: &str) -> String {
    args.to_owned()
}

/// Wraps `somebuggyfunc`, calls it, reconfigures the wrapper, calls it again.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the records
/// file cannot be created.
pub fn decorator(args: &DecoratorArgs) -> Result<(), LogwrapError> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply_overrides(args.level, args.message.clone(), args.records_file.clone());

    let log = config.build_decorator()?;
    let wrapped = instrument!(log, somebuggyfunc);

    println!("{}", wrapped.call((DEMO_ARGUMENT,)));

    wrapped.set_level(args.then_level);
    wrapped.set_message(&args.then_message);

    println!("{}", wrapped.call((DEMO_ARGUMENT,)));
    Ok(())
}

/// Looks each key up in a small colour table and prints the answer.
pub fn fallback(args: &FallbackArgs) {
    let colours: FallbackMap<String, String> = [
        ("red", "#ff0000"),
        ("green", "#00ff00"),
        ("blue", "#0000ff"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect();

    for key in &args.keys {
        println!("{key}: {}", colours.lookup(key));
    }
}

#[derive(Debug, Error)]
#[error("Something went wrong...")]
struct SomeError {
    #[source]
    source: io::Error,
}

fn failing_step() -> Result<(), SomeError> {
    Err(SomeError {
        source: io::Error::new(io::ErrorKind::NotFound, "settings.yaml is missing"),
    })
}

/// Catches a failure, prints its report to stderr, and carries on.
pub fn report() {
    if let Err(err) = failing_step() {
        report::print(&err);
    }
    println!("continued after failure");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn somebuggyfunc_echoes() {
        assert_eq!(somebuggyfunc(DEMO_ARGUMENT), DEMO_ARGUMENT);
    }

    #[test]
    fn failing_step_keeps_cause() {
        let err = failing_step().unwrap_err();
        let report = report::ErrorReport::new(&err);
        assert_eq!(
            report.to_string(),
            "Something went wrong...\n  caused by: settings.yaml is missing"
        );
    }

    #[test]
    fn decorator_demo_writes_two_records() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("records.jsonl");
        let args = DecoratorArgs {
            config: None,
            level: None,
            message: None,
            then_level: crate::severity::Severity::Critical,
            then_message: "new-message".to_owned(),
            records_file: Some(path.clone()),
        };

        decorator(&args).unwrap();

        let records: Vec<serde_json::Value> = std::fs::read_to_string(&path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["severity"], "WARNING");
        assert_eq!(records[0]["message"], "somebuggyfunc - example-param");
        assert_eq!(records[1]["severity"], "CRITICAL");
        assert_eq!(records[1]["message"], "somebuggyfunc - new-message");
    }
}
