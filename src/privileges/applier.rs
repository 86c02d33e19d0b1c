//! Privilege applier
//!
//! Ensures the standard grant set exists on the active database instance.
//! The actual SQL execution lives behind the `GrantExecutor` capability; the
//! applier owns the skip rule and the collect-don't-abort failure policy.

use serde::{Deserialize, Serialize};

use crate::config::NodeConfig;

use super::errors::{FailedGrant, GrantFailures};
use super::GrantError;

pub const ROLE_ADMINISTRATOR: &str = "administrator";
pub const ROLE_USER: &str = "user";
pub const ROLE_REPLICATION: &str = "replication";

/// Executes a single role grant on the active database instance.
pub trait GrantExecutor {
    fn grant_role(&self, username: &str, password: &str, role: &str) -> Result<(), GrantError>;
}

/// One (role, username, password) grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivilegeGrant {
    pub role: String,
    pub username: String,
    pub password: String,
}

impl PrivilegeGrant {
    pub fn new(
        role: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Per LIFECYCLE_MODEL.md §5: an empty username means the tier is absent
    /// from this deployment. Not an error, not a warning.
    pub fn is_skipped(&self) -> bool {
        self.username.is_empty()
    }
}

/// The grant set ensured on every run: administrator, application user,
/// replication user. Tiers without a configured username are skipped by
/// `apply_grants`.
pub fn standard_grants(config: &NodeConfig) -> Vec<PrivilegeGrant> {
    vec![
        PrivilegeGrant::new(
            ROLE_ADMINISTRATOR,
            config.admin.user.clone(),
            config.admin.password.clone(),
        ),
        PrivilegeGrant::new(
            ROLE_USER,
            config.application.user.clone(),
            config.application.password.clone(),
        ),
        PrivilegeGrant::new(
            ROLE_REPLICATION,
            config.replication.user.clone(),
            config.replication.password.clone(),
        ),
    ]
}

/// Apply all grants, attempting every non-skipped grant independently.
///
/// A failure on one grant never prevents the next from being attempted;
/// the aggregate is returned after all attempts. `Ok(())` means every
/// attempted grant succeeded (possibly zero attempts).
pub fn apply_grants(
    grants: &[PrivilegeGrant],
    executor: &dyn GrantExecutor,
) -> Result<(), GrantFailures> {
    let mut failures = Vec::new();

    for grant in grants {
        if grant.is_skipped() {
            continue;
        }
        if let Err(error) = executor.grant_role(&grant.username, &grant.password, &grant.role) {
            failures.push(FailedGrant {
                role: grant.role.clone(),
                username: grant.username.clone(),
                error,
            });
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(GrantFailures { failures })
    }
}
