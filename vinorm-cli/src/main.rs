//! vinorm binary entry point
//!
//! Reads one UTF-8 text blob, writes the delimiter-joined normalized
//! output, and exits non-zero only on unrecoverable configuration or
//! I/O failures.

use clap::Parser;
use vinorm_cli::cli::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = cli.execute() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
