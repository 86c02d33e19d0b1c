//! TTL guard error types

use thiserror::Error;

/// Result type for TTL guard operations
pub type DnsResult<T> = Result<T, DnsGuardError>;

/// TTL guard errors. Both variants are fatal for the run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DnsGuardError {
    /// The master record's TTL exceeds the configured limit.
    #[error("master DB DNS TTL set too high for {fqdn}: TTL={observed}s, must be <= {limit}s")]
    TtlExceeded {
        fqdn: String,
        observed: u32,
        limit: u32,
    },

    /// The resolver was unreachable or returned a malformed answer.
    #[error("failed to resolve TTL for {fqdn}: {message}")]
    Resolution { fqdn: String, message: String },
}

impl DnsGuardError {
    pub fn ttl_exceeded(fqdn: impl Into<String>, observed: u32, limit: u32) -> Self {
        Self::TtlExceeded {
            fqdn: fqdn.into(),
            observed,
            limit,
        }
    }

    pub fn resolution(fqdn: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Resolution {
            fqdn: fqdn.into(),
            message: message.into(),
        }
    }
}
