//! Node role state machine
//!
//! Per LIFECYCLE_MODEL.md §2:
//! - `initialized` implies exactly one successful registration pass and a
//!   definite `is_master`
//! - no transition ever returns to `uninitialized` inside this component
//! - re-confirming the already-initialized role is idempotent; confirming
//!   the opposite role is an illegal transition

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{LifecycleError, LifecycleResult};

/// Whether role assignment has been durably confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitStatus {
    Uninitialized,
    Initialized,
}

/// Externally assigned node role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Master,
    Slave,
}

impl NodeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeRole::Master => "master",
            NodeRole::Slave => "slave",
        }
    }
}

/// Persisted role state, one per node.
///
/// Created uninitialized at first boot, mutated only by the orchestrator's
/// registration actions, never deleted (re-provisioning resets it
/// externally).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRoleState {
    pub status: InitStatus,
    pub is_master: bool,

    /// Identity of the node currently acting as master, once resolved.
    pub current_master_uuid: Option<Uuid>,
    pub current_master_ip: Option<String>,
}

impl NodeRoleState {
    /// First-boot state.
    pub fn uninitialized() -> Self {
        Self {
            status: InitStatus::Uninitialized,
            is_master: false,
            current_master_uuid: None,
            current_master_ip: None,
        }
    }

    pub fn initialized_master() -> Self {
        Self {
            status: InitStatus::Initialized,
            is_master: true,
            current_master_uuid: None,
            current_master_ip: None,
        }
    }

    pub fn initialized_slave() -> Self {
        Self {
            status: InitStatus::Initialized,
            is_master: false,
            current_master_uuid: None,
            current_master_ip: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.status == InitStatus::Initialized
    }

    /// The confirmed role, `None` until initialized (before that,
    /// `is_master` is only a default, not a decision).
    pub fn role(&self) -> Option<NodeRole> {
        if !self.is_initialized() {
            return None;
        }
        Some(if self.is_master {
            NodeRole::Master
        } else {
            NodeRole::Slave
        })
    }

    /// Confirm this node as master after a successful registration pass.
    ///
    /// Idempotent for an initialized master; illegal for an initialized
    /// slave (role flips are external operations).
    pub fn confirm_master(self) -> LifecycleResult<Self> {
        match (self.status, self.is_master) {
            (InitStatus::Initialized, false) => Err(LifecycleError::illegal_transition(
                "node is an initialized slave; cannot confirm as master",
            )),
            _ => Ok(Self {
                status: InitStatus::Initialized,
                is_master: true,
                ..self
            }),
        }
    }

    /// Confirm this node as slave after a successful registration pass.
    pub fn confirm_slave(self) -> LifecycleResult<Self> {
        match (self.status, self.is_master) {
            (InitStatus::Initialized, true) => Err(LifecycleError::illegal_transition(
                "node is an initialized master; cannot confirm as slave",
            )),
            _ => Ok(Self {
                status: InitStatus::Initialized,
                is_master: false,
                ..self
            }),
        }
    }

    /// Record the identity of the node currently acting as master.
    pub fn record_master_identity(&mut self, uuid: Uuid, ip: impl Into<String>) {
        self.current_master_uuid = Some(uuid);
        self.current_master_ip = Some(ip.into());
    }

    /// State name for observability.
    pub fn state_name(&self) -> &'static str {
        match (self.status, self.is_master) {
            (InitStatus::Uninitialized, _) => "uninitialized",
            (InitStatus::Initialized, true) => "master",
            (InitStatus::Initialized, false) => "slave",
        }
    }
}

impl Default for NodeRoleState {
    fn default() -> Self {
        Self::uninitialized()
    }
}
