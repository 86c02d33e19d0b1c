//! Lifecycle error types
//!
//! Per LIFECYCLE_MODEL.md §7: configuration, TTL, resolution, install, and
//! registration failures abort the run with a single terminal reason. Grant
//! failures are not errors at this level; they ride in the run outcome.

use thiserror::Error;

use crate::dns::DnsGuardError;

use super::collaborators::{InstallError, RegistrationError, TagError};

/// Result type for lifecycle operations
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Fatal lifecycle errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LifecycleError {
    /// Precondition failure; nothing was invoked.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// TTL guard refused the run or the resolver failed.
    #[error(transparent)]
    Dns(#[from] DnsGuardError),

    #[error(transparent)]
    Install(#[from] InstallError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Tag(#[from] TagError),

    /// A role transition the state machine forbids (e.g. confirming slave
    /// on an initialized master). Role flips are external operations.
    #[error("illegal role transition: {0}")]
    IllegalTransition(String),

    /// Persisted node state could not be read or written.
    #[error("state store failure: {0}")]
    StateStore(String),
}

impl LifecycleError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn illegal_transition(message: impl Into<String>) -> Self {
        Self::IllegalTransition(message.into())
    }

    pub fn state_store(message: impl Into<String>) -> Self {
        Self::StateStore(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dns_error_passes_through_display() {
        let err: LifecycleError = DnsGuardError::ttl_exceeded("db.example.com", 120, 60).into();
        let rendered = err.to_string();
        assert!(rendered.contains("db.example.com"));
        assert!(rendered.contains("120"));
    }

    #[test]
    fn test_configuration_display() {
        let err = LifecycleError::configuration("provider not set");
        assert!(err.to_string().contains("provider not set"));
    }
}
