//! Role lifecycle subsystem
//!
//! Per LIFECYCLE_MODEL.md:
//! - a node is master or slave; the role is assigned externally, never
//!   elected or inferred here
//! - every boot runs one idempotent lifecycle pass: precondition, TTL
//!   guard, active tag, install, registration branch, privilege grants
//! - `initialized` implies exactly one completed registration pass and
//!   never reverts inside this component
//!
//! Side effects live behind the collaborator traits; the decision logic
//! itself is pure and exhaustively tested.

mod collaborators;
mod errors;
mod hooks;
mod orchestrator;
mod state;
mod store;

pub use collaborators::{
    DatabaseProvider, InstallError, RegistrationError, Registrar, TagError, TagPublisher,
};
pub use errors::{LifecycleError, LifecycleResult};
pub use hooks::{HookCollaborators, ENV_ADMIN_PASSWORD, ENV_GRANT_PASSWORD};
pub use orchestrator::{decide, Action, Orchestrator, RunOutcome, ACTIVE_TAG_KEY};
pub use state::{InitStatus, NodeRole, NodeRoleState};
pub use store::{PersistedNode, StateStore};
