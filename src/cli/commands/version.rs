//! Version information display
//!
//! Prints the package name and version in human or JSON format.

use serde_json::json;

use crate::cli::args::{OutputFormat, VersionArgs};
use crate::error::LogwrapError;

/// Print version information.
///
/// # Errors
///
/// Returns an error if the JSON form cannot be serialized.
pub fn run(args: &VersionArgs) -> Result<(), LogwrapError> {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    match args.format {
        OutputFormat::Human => println!("{name} {version}"),
        OutputFormat::Json => {
            let body = serde_json::to_string(&json!({ "name": name, "version": version }))?;
            println!("{body}");
        }
    }
    Ok(())
}
