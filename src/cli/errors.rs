//! CLI error type

use thiserror::Error;

use crate::config::ConfigError;
use crate::lifecycle::LifecycleError;
use crate::schedule::ScheduleError;

/// Result type for CLI commands
pub type CliResult<T> = Result<T, CliError>;

/// Errors surfaced to the operator with exit code 1.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}
