//! CLI argument definitions
//!
//! All Clap derive structs for `logwrap` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::observability::LogFormat;
use crate::severity::Severity;

// ============================================================================
// Root CLI
// ============================================================================

/// Function instrumentation with runtime-adjustable log level and message.
#[derive(Parser, Debug)]
#[command(name = "logwrap", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "LOGWRAP_COLOR")]
    pub color: ColorChoice,

    /// Log line format.
    #[arg(long, default_value = "human", global = true, env = "LOGWRAP_LOG_FORMAT")]
    pub log_format: LogFormat,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one of the bundled demonstrations.
    Demo(DemoCommand),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

// ============================================================================
// Demo Command
// ============================================================================

/// Demonstration commands.
#[derive(Args, Debug)]
pub struct DemoCommand {
    /// Demonstration to run.
    #[command(subcommand)]
    pub subcommand: DemoSubcommand,
}

/// Demonstrations.
#[derive(Subcommand, Debug)]
pub enum DemoSubcommand {
    /// Wrap a function, call it, reconfigure the wrapper, call it again.
    Decorator(DecoratorArgs),

    /// Look keys up in a map that answers misses with a warning.
    Fallback(FallbackArgs),

    /// Catch a failure, print its cause chain, and keep going.
    Report,
}

/// Arguments for `demo decorator`.
#[derive(Args, Debug)]
pub struct DecoratorArgs {
    /// Path to YAML configuration file.
    #[arg(short, long, env = "LOGWRAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Severity used before reconfiguration.
    #[arg(short, long, ignore_case = true)]
    pub level: Option<Severity>,

    /// Message used before reconfiguration.
    #[arg(short, long)]
    pub message: Option<String>,

    /// Severity switched to before the second call.
    #[arg(long, default_value = "critical", ignore_case = true)]
    pub then_level: Severity,

    /// Message switched to before the second call.
    #[arg(long, default_value = "new-message")]
    pub then_message: String,

    /// Write records as JSON lines to this file instead of the log.
    #[arg(long, env = "LOGWRAP_RECORDS_FILE")]
    pub records_file: Option<PathBuf>,
}

/// Arguments for `demo fallback`.
#[derive(Args, Debug)]
pub struct FallbackArgs {
    /// Keys to look up.
    #[arg(required = true)]
    pub keys: Vec<String>,
}

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for informational commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}
