//! External capability seams
//!
//! Everything side-effecting that is not the orchestrator's own decision
//! logic lives behind one of these traits: engine installation, master and
//! slave registration, and discovery tag publication. The TTL resolver seam
//! is in `dns::TtlResolver` and the grant seam in
//! `privileges::GrantExecutor`.
//!
//! Collaborator calls are synchronous and may block for the duration of a
//! run; the external scheduler owns timeouts and retries.

use std::path::Path;

use thiserror::Error;

/// Engine installation failed. Partial installs are the provider's problem
/// to clean up, not ours.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("install failed: {message}")]
pub struct InstallError {
    pub message: String,
}

impl InstallError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Master or slave registration failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("registration failed: {message}")]
pub struct RegistrationError {
    pub message: String,
}

impl RegistrationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Discovery tag publication failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("tag publication failed: {message}")]
pub struct TagError {
    pub message: String,
}

impl TagError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Installs and configures the concrete database engine.
///
/// Idempotent by contract: calling install on an already-installed node is
/// a cheap no-op for the provider.
pub trait DatabaseProvider {
    fn install(
        &self,
        data_dir: &Path,
        admin_user: &str,
        admin_password: &str,
    ) -> Result<(), InstallError>;
}

/// Registers the node in its role with the fleet's discovery/config layer.
pub trait Registrar {
    /// Register as master. `restore` is false on update passes.
    fn register_master(&self, restore: bool) -> Result<(), RegistrationError>;

    /// Register as slave. `restore` pulls a full copy from `lineage`;
    /// update passes skip the restore.
    fn register_slave(&self, restore: bool, lineage: &str) -> Result<(), RegistrationError>;
}

/// Publishes key/value tags to the fleet's service discovery.
pub trait TagPublisher {
    fn publish_tag(&self, key: &str, value: &str) -> Result<(), TagError>;
}
