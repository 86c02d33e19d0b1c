//! Role lifecycle orchestrator
//!
//! Per LIFECYCLE_MODEL.md §3, a run is strictly ordered:
//! provider precondition → TTL guard → active tag → install → registration
//! branch → privilege grants. Each step's postcondition is the next step's
//! precondition, so there is no internal parallelism and no cancellation;
//! a run either completes (possibly with collected grant failures) or
//! aborts fatally.
//!
//! The orchestrator is purely coordinating: role assignment comes from
//! outside, engine installation and registration are collaborator
//! capabilities, and the decision itself is the pure `decide` function.

use crate::config::NodeConfig;
use crate::dns::{self, TtlResolver};
use crate::observability::Logger;
use crate::privileges::{apply_grants, standard_grants, FailedGrant, GrantExecutor};

use super::collaborators::{DatabaseProvider, Registrar, TagPublisher};
use super::errors::{LifecycleError, LifecycleResult};
use super::state::{InitStatus, NodeRole, NodeRoleState};

/// Discovery tag marking this node as an active database.
pub const ACTIVE_TAG_KEY: &str = "database:active";

/// The action a run takes, decided from persisted state and the external
/// role assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// First registration as master, restoring from the backup lineage.
    InstallAndRegisterMaster,
    /// First registration as slave, restoring from the backup lineage.
    InstallAndRegisterSlave,
    /// Cheap re-registration of an already-confirmed master. No restore.
    UpdateMaster,
    /// Cheap re-registration of an already-confirmed slave. No restore.
    UpdateSlave,
    /// Uninitialized with no assignment: registration deferred to the
    /// external orchestration layer.
    NoOp,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::InstallAndRegisterMaster => "install_and_register_master",
            Action::InstallAndRegisterSlave => "install_and_register_slave",
            Action::UpdateMaster => "update_master",
            Action::UpdateSlave => "update_slave",
            Action::NoOp => "no_op",
        }
    }

    /// Whether this action performs a data restore.
    pub fn restores(&self) -> bool {
        matches!(
            self,
            Action::InstallAndRegisterMaster | Action::InstallAndRegisterSlave
        )
    }
}

/// Decide the registration action. Pure function, exhaustive over the
/// state machine of LIFECYCLE_MODEL.md §2.
///
/// An initialized node always updates its persisted role; the external
/// assignment is only consulted for first registration (role flips are an
/// external operation, never decided here).
pub fn decide(state: &NodeRoleState, assignment: Option<NodeRole>) -> Action {
    match (state.status, state.is_master) {
        (InitStatus::Initialized, true) => Action::UpdateMaster,
        (InitStatus::Initialized, false) => Action::UpdateSlave,
        (InitStatus::Uninitialized, _) => match assignment {
            Some(NodeRole::Master) => Action::InstallAndRegisterMaster,
            Some(NodeRole::Slave) => Action::InstallAndRegisterSlave,
            None => Action::NoOp,
        },
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub action: Action,
    pub state: NodeRoleState,

    /// Grant failures collected by the privilege applier. A non-empty list
    /// does not make the run a failure.
    pub failed_grants: Vec<FailedGrant>,
}

/// The role lifecycle orchestrator, composing the external capabilities.
pub struct Orchestrator<'a> {
    provider: &'a dyn DatabaseProvider,
    resolver: &'a dyn TtlResolver,
    registrar: &'a dyn Registrar,
    tags: &'a dyn TagPublisher,
    grants: &'a dyn GrantExecutor,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        provider: &'a dyn DatabaseProvider,
        resolver: &'a dyn TtlResolver,
        registrar: &'a dyn Registrar,
        tags: &'a dyn TagPublisher,
        grants: &'a dyn GrantExecutor,
    ) -> Self {
        Self {
            provider,
            resolver,
            registrar,
            tags,
            grants,
        }
    }

    /// Execute one lifecycle pass.
    ///
    /// Idempotent across reboots: a confirmed node re-runs as a cheap
    /// update, an unconfirmed node performs its first registration. Fatal
    /// failures abort before any later step runs.
    pub fn run(
        &self,
        config: &NodeConfig,
        state: NodeRoleState,
        assignment: Option<NodeRole>,
    ) -> LifecycleResult<RunOutcome> {
        // Precondition: nothing may run without a configured provider
        config
            .validate_provider()
            .map_err(|e| LifecycleError::configuration(e.to_string()))?;

        self.check_ttl(config)?;

        // Publish before registration so discovery already sees the node
        // as a candidate while later steps are mid-flight
        self.tags.publish_tag(ACTIVE_TAG_KEY, "true")?;
        Logger::info("tag_published", &[("key", ACTIVE_TAG_KEY), ("value", "true")]);

        self.provider.install(
            &config.data_dir,
            &config.admin.user,
            &config.admin.password,
        )?;
        Logger::info(
            "install_complete",
            &[
                ("provider", config.provider_type.as_str()),
                ("version", config.version.as_str()),
            ],
        );

        let action = decide(&state, assignment);
        let state = self.register(config, state, action)?;
        Logger::info(
            "registration_complete",
            &[("action", action.name()), ("state", state.state_name())],
        );

        // Grants always run, independent of the branch taken
        let failed_grants = match apply_grants(&standard_grants(config), self.grants) {
            Ok(()) => Vec::new(),
            Err(failures) => {
                for failed in &failures.failures {
                    Logger::warn(
                        "grant_failed",
                        &[
                            ("role", failed.role.as_str()),
                            ("username", failed.username.as_str()),
                            ("reason", failed.error.message.as_str()),
                        ],
                    );
                }
                failures.failures
            }
        };

        Ok(RunOutcome {
            action,
            state,
            failed_grants,
        })
    }

    fn check_ttl(&self, config: &NodeConfig) -> LifecycleResult<()> {
        let fqdn = config.dns.master_fqdn.as_str();
        if fqdn == dns::LOCAL_FQDN {
            Logger::info("ttl_check_skipped", &[("fqdn", fqdn)]);
            return Ok(());
        }

        let limit = config.dns.ttl_limit_secs.to_string();
        Logger::info("ttl_check", &[("fqdn", fqdn), ("limit_secs", limit.as_str())]);
        dns::check_master_ttl(fqdn, config.dns.ttl_limit_secs, self.resolver)?;
        Ok(())
    }

    fn register(
        &self,
        config: &NodeConfig,
        state: NodeRoleState,
        action: Action,
    ) -> LifecycleResult<NodeRoleState> {
        let lineage = config.backup.effective_lineage();
        match action {
            Action::InstallAndRegisterMaster => {
                self.registrar.register_master(true)?;
                state.confirm_master()
            }
            Action::UpdateMaster => {
                self.registrar.register_master(false)?;
                state.confirm_master()
            }
            Action::InstallAndRegisterSlave => {
                self.registrar.register_slave(true, lineage)?;
                state.confirm_slave()
            }
            Action::UpdateSlave => {
                self.registrar.register_slave(false, lineage)?;
                state.confirm_slave()
            }
            Action::NoOp => Ok(state),
        }
    }
}
