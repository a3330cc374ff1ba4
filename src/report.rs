//! Printing an error together with its cause chain.
//!
//! The report is for display only: printing it does not change control flow,
//! so callers that catch an error to show it can carry on afterwards.

use std::error::Error;
use std::fmt;
use std::io::Write;

/// Displays an error followed by one `caused by:` line per source.
///
/// ```text
/// failed to load settings
///   caused by: file not found: settings.yaml
///   caused by: No such file or directory (os error 2)
/// ```
pub struct ErrorReport<'a> {
    error: &'a (dyn Error + 'static),
}

impl<'a> ErrorReport<'a> {
    /// Creates a report for `error`.
    #[must_use]
    pub fn new(error: &'a (dyn Error + 'static)) -> Self {
        Self { error }
    }

    /// The error's sources, outermost first, excluding the error itself.
    pub fn causes(&self) -> impl Iterator<Item = &'a (dyn Error + 'static)> {
        std::iter::successors(self.error.source(), |e| Error::source(*e))
    }
}

impl fmt::Display for ErrorReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        for cause in self.causes() {
            write!(f, "\n  caused by: {cause}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ErrorReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Writes the report for `error` to `out`, one line per cause.
///
/// # Errors
///
/// Returns an I/O error if `out` cannot be written.
pub fn write_report(
    out: &mut impl Write,
    error: &(dyn Error + 'static),
) -> std::io::Result<()> {
    writeln!(out, "{}", ErrorReport::new(error))
}

/// Prints the report for `error` to stderr and returns.
pub fn print(error: &(dyn Error + 'static)) {
    let _ = write_report(&mut std::io::stderr().lock(), error);
}

#[cfg(test)]
mod tests {
    use thiserror::Error;

    use super::*;

    #[derive(Debug, Error)]
    #[error("disk unplugged")]
    struct Root;

    #[derive(Debug, Error)]
    #[error("could not read block")]
    struct Middle(#[source] Root);

    #[derive(Debug, Error)]
    #[error("something went wrong...")]
    struct Top(#[source] Middle);

    #[test]
    fn single_error_has_no_causes() {
        let report = ErrorReport::new(&Root);
        assert_eq!(report.causes().count(), 0);
        assert_eq!(report.to_string(), "disk unplugged");
    }

    #[test]
    fn chain_is_printed_outermost_first() {
        let err = Top(Middle(Root));
        let report = ErrorReport::new(&err);

        assert_eq!(
            report.to_string(),
            "something went wrong...\n  caused by: could not read block\n  caused by: disk unplugged"
        );
    }

    #[test]
    fn write_report_ends_with_newline() {
        let err = Middle(Root);
        let mut out = Vec::new();
        write_report(&mut out, &err).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "could not read block\n  caused by: disk unplugged\n");
    }

    #[test]
    fn io_errors_report_their_kind() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.yaml");
        let report = ErrorReport::new(&err);
        assert!(report.to_string().contains("missing.yaml"));
    }
}
