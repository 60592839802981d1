//! Bank Ledger CLI
//!
//! Command-line interface for analysing card spending in a transaction history
//! CSV file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- categorize history.csv --card "5106 2107 0000 0000" > categories.csv
//! cargo run -- categorize history.csv --card "5106 2107 0000 0000" --strategy channel --workers 8
//! cargo run -- top history.csv --card "5106 2107 0000 0000" --limit 5
//! ```
//!
//! Diagnostics go to stderr; set `RUST_LOG` (default `warn`) to change verbosity.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use bank_ledger::cli;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let mut output = std::io::stdout();
    if let Err(e) = cli::run(&args, &mut output) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}
