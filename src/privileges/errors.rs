//! Grant error types
//!
//! A single grant failure is recoverable: it is recorded and the remaining
//! grants are still attempted. The aggregate is reported after all attempts.

use std::fmt;

use thiserror::Error;

/// Error returned by the external grant capability for one grant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("grant rejected: {message}")]
pub struct GrantError {
    pub message: String,
}

impl GrantError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One grant that was attempted and failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedGrant {
    pub role: String,
    pub username: String,
    pub error: GrantError,
}

/// Aggregate of all grant failures from a single apply pass.
///
/// Invariant: never constructed empty; an empty failure list is `Ok(())`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantFailures {
    pub failures: Vec<FailedGrant>,
}

impl GrantFailures {
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for GrantFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} grant(s) failed:", self.failures.len())?;
        for failed in &self.failures {
            write!(
                f,
                " [{} as {}: {}]",
                failed.username, failed.role, failed.error.message
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for GrantFailures {}
