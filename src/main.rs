//! dbsteward CLI entry point
//!
//! Minimal entrypoint: parse arguments, dispatch, print the terminal error
//! reason to stderr, exit non-zero on failure. All logic lives in the CLI
//! module and below.

use dbsteward::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
