//! Privilege grants
//!
//! Per LIFECYCLE_MODEL.md §5:
//! - a fixed grant set is ensured on every run, independent of role
//! - grants with an empty username are silently skipped
//! - each grant is attempted independently; failures are collected, never
//!   aborting the run
//! - applying the same grant twice yields the same end state

mod applier;
mod errors;

pub use applier::{apply_grants, standard_grants, GrantExecutor, PrivilegeGrant};
pub use applier::{ROLE_ADMINISTRATOR, ROLE_REPLICATION, ROLE_USER};
pub use errors::{FailedGrant, GrantError, GrantFailures};
