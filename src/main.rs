//! `logwrap` - function instrumentation demonstrations

use clap::Parser;

use logwrap::cli::args::Cli;
use logwrap::cli::commands;
use logwrap::error::ExitCode;
use logwrap::observability::{LogSettings, init_logging};
use logwrap::report::ErrorReport;

fn main() {
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        if e.use_stderr() {
            let _ = e.print();
            std::process::exit(ExitCode::USAGE_ERROR);
        }
        e.exit()
    });

    init_logging(&LogSettings::from_cli(&cli));

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {}", ErrorReport::new(&e));
            std::process::exit(e.exit_code());
        }
    }
}
