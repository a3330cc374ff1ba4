//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod completions;
pub mod demo;
pub mod version;

use crate::cli::args::{Cli, Commands, DemoSubcommand};
use crate::error::LogwrapError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), LogwrapError> {
    match cli.command {
        Commands::Demo(cmd) => match cmd.subcommand {
            DemoSubcommand::Decorator(args) => demo::decorator(&args),
            DemoSubcommand::Fallback(args) => {
                demo::fallback(&args);
                Ok(())
            }
            DemoSubcommand::Report => {
                demo::report();
                Ok(())
            }
        },
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => version::run(&args),
    }
}
