//! Logging initialization for `logwrap`.
//!
//! The binary installs one global `tracing` subscriber on stderr. Wrapped
//! function records reach it through [`TracingSink`](crate::sink::TracingSink)
//! under the `logwrap::record` target, so the same filter governs them and
//! the crate's own diagnostics.

use std::io::IsTerminal;

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{Cli, ColorChoice};

/// Environment variable that overrides the verbosity-derived filter.
pub const LOG_LEVEL_ENV: &str = "LOGWRAP_LOG_LEVEL";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with optional ANSI colors.
    #[default]
    Human,
    /// Newline-delimited JSON; record fields appear under `fields`.
    Json,
}

/// Maps a `-v` count to a tracing directive string.
///
/// - 0 → `"warn"`
/// - 1 → `"info"`
/// - 2 → `"debug"`
/// - 3+ → `"trace"`
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Subscriber settings gathered from the global command-line flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogSettings {
    /// Line format.
    pub format: LogFormat,
    /// Number of `-v` flags.
    pub verbosity: u8,
    /// Silence everything, records included.
    pub quiet: bool,
    /// ANSI color policy for the human format.
    pub color: ColorChoice,
}

impl LogSettings {
    /// Reads the global flags of a parsed command line.
    #[must_use]
    pub const fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.log_format,
            verbosity: cli.verbose,
            quiet: cli.quiet,
            color: cli.color,
        }
    }

    /// Directive used when `LOGWRAP_LOG_LEVEL` is unset.
    #[must_use]
    pub const fn directive(&self) -> &'static str {
        if self.quiet {
            "off"
        } else {
            verbosity_to_directive(self.verbosity)
        }
    }

    /// Builds the filter. `--quiet` wins over the environment.
    fn filter(&self) -> EnvFilter {
        if self.quiet {
            return EnvFilter::new("off");
        }
        EnvFilter::try_from_env(LOG_LEVEL_ENV).unwrap_or_else(|_| EnvFilter::new(self.directive()))
    }

    /// Whether human output gets ANSI colors, given whether stderr is a
    /// terminal and whether `NO_COLOR` is set.
    #[must_use]
    pub const fn use_ansi(&self, stderr_is_terminal: bool, no_color: bool) -> bool {
        match self.color {
            ColorChoice::Auto => stderr_is_terminal && !no_color,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }

    /// Module targets are shown from `-vv` on.
    const fn show_target(&self) -> bool {
        self.verbosity >= 2
    }
}

/// Installs the global tracing subscriber.
///
/// Uses `try_init()`, so a second call is a no-op.
pub fn init_logging(settings: &LogSettings) {
    let filter = settings.filter();
    let show_target = settings.show_target();

    match settings.format {
        LogFormat::Human => {
            let ansi = settings.use_ansi(
                std::io::stderr().is_terminal(),
                std::env::var_os("NO_COLOR").is_some(),
            );
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(ansi)
                .with_target(show_target)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogFormat::Json => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_target(show_target)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn settings(args: &[&str]) -> LogSettings {
        let mut argv = vec!["logwrap"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["demo", "report"]);
        LogSettings::from_cli(&Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn verbosity_maps_to_directives() {
        assert_eq!(verbosity_to_directive(0), "warn");
        assert_eq!(verbosity_to_directive(1), "info");
        assert_eq!(verbosity_to_directive(2), "debug");
        assert_eq!(verbosity_to_directive(3), "trace");
        assert_eq!(verbosity_to_directive(255), "trace");
    }

    #[test]
    fn settings_follow_global_flags() {
        let s = settings(&["-vv", "--log-format", "json", "--color", "never"]);
        assert_eq!(s.format, LogFormat::Json);
        assert_eq!(s.directive(), "debug");
        assert!(s.show_target());
        assert!(!s.use_ansi(true, false));
    }

    #[test]
    fn quiet_turns_everything_off() {
        let s = settings(&["-vvv", "--quiet"]);
        assert_eq!(s.directive(), "off");
    }

    #[test]
    fn auto_color_needs_a_terminal_and_no_no_color() {
        let s = LogSettings::default();
        assert!(s.use_ansi(true, false));
        assert!(!s.use_ansi(false, false));
        assert!(!s.use_ansi(true, true));

        let always = LogSettings {
            color: ColorChoice::Always,
            ..LogSettings::default()
        };
        assert!(always.use_ansi(false, true));
    }

    #[test]
    fn init_logging_twice_is_harmless() {
        init_logging(&LogSettings::default());
        init_logging(&LogSettings {
            format: LogFormat::Json,
            verbosity: 3,
            ..LogSettings::default()
        });
    }
}
