//! Command line interface
//!
//! Thin argument parsing and dispatch; all lifecycle behavior lives in the
//! library modules.

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, RoleArg};
pub use commands::run;
pub use errors::{CliError, CliResult};
