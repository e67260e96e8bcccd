//! mdtest CLI binary.
//!
//! Entry point for the `mdtest` command-line tool.

use std::process::ExitCode;

use clap::Parser;
use mdtest_clock::SystemClock;
use mdtest_cli::exit::{exit_code, outcome_code};
use mdtest_cli::{execute, Cli};
use mdtest_fs::RealFilesystem;
use mdtest_harness::{ConsoleReporter, StderrLogger, Verbosity};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let verbosity = Verbosity::from_count(cli.verbose);
    let logger = StderrLogger::new(verbosity);
    let reporter = ConsoleReporter::stdout().with_verbosity(verbosity);
    let clock = SystemClock::new();
    let fs = RealFilesystem;

    match execute(&cli, &fs, &clock, &reporter, &logger) {
        Ok(outcome) => ExitCode::from(outcome_code(&outcome) as u8),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(exit_code(&e) as u8)
        }
    }
}
