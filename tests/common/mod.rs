//! Shared test harness: recording collaborators for orchestrator scenarios.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use dbsteward::dns::{DnsGuardError, DnsResult, TtlResolver};
use dbsteward::lifecycle::{
    DatabaseProvider, InstallError, RegistrationError, Registrar, TagError, TagPublisher,
};
use dbsteward::privileges::{GrantError, GrantExecutor};

/// Records every collaborator call; optionally fails grants for listed
/// usernames.
#[derive(Default)]
pub struct Recorder {
    pub installs: RefCell<Vec<(PathBuf, String)>>,
    pub master_registrations: RefCell<Vec<bool>>,
    pub slave_registrations: RefCell<Vec<(bool, String)>>,
    pub tags: RefCell<Vec<(String, String)>>,
    pub grants: RefCell<Vec<(String, String)>>,
    pub fail_grant_users: Vec<String>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_grants(users: &[&str]) -> Self {
        Self {
            fail_grant_users: users.iter().map(|u| u.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn install_count(&self) -> usize {
        self.installs.borrow().len()
    }

    pub fn grant_count(&self) -> usize {
        self.grants.borrow().len()
    }

    pub fn registration_count(&self) -> usize {
        self.master_registrations.borrow().len() + self.slave_registrations.borrow().len()
    }

    pub fn total_calls(&self) -> usize {
        self.install_count()
            + self.registration_count()
            + self.tags.borrow().len()
            + self.grant_count()
    }
}

impl DatabaseProvider for Recorder {
    fn install(
        &self,
        data_dir: &Path,
        admin_user: &str,
        _admin_password: &str,
    ) -> Result<(), InstallError> {
        self.installs
            .borrow_mut()
            .push((data_dir.to_path_buf(), admin_user.to_string()));
        Ok(())
    }
}

impl Registrar for Recorder {
    fn register_master(&self, restore: bool) -> Result<(), RegistrationError> {
        self.master_registrations.borrow_mut().push(restore);
        Ok(())
    }

    fn register_slave(&self, restore: bool, lineage: &str) -> Result<(), RegistrationError> {
        self.slave_registrations
            .borrow_mut()
            .push((restore, lineage.to_string()));
        Ok(())
    }
}

impl TagPublisher for Recorder {
    fn publish_tag(&self, key: &str, value: &str) -> Result<(), TagError> {
        self.tags
            .borrow_mut()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }
}

impl GrantExecutor for Recorder {
    fn grant_role(&self, username: &str, _password: &str, role: &str) -> Result<(), GrantError> {
        self.grants
            .borrow_mut()
            .push((username.to_string(), role.to_string()));
        if self.fail_grant_users.iter().any(|u| u == username) {
            return Err(GrantError::new("simulated grant failure"));
        }
        Ok(())
    }
}

/// Resolver answering with a fixed TTL, counting lookups.
#[derive(Default)]
pub struct FixedResolver {
    pub ttl: u32,
    pub lookups: RefCell<usize>,
}

impl FixedResolver {
    pub fn new(ttl: u32) -> Self {
        Self {
            ttl,
            lookups: RefCell::new(0),
        }
    }

    pub fn lookup_count(&self) -> usize {
        *self.lookups.borrow()
    }
}

impl TtlResolver for FixedResolver {
    fn resolve_ttl(&self, _fqdn: &str) -> DnsResult<u32> {
        *self.lookups.borrow_mut() += 1;
        Ok(self.ttl)
    }
}

/// Resolver that fails every lookup.
pub struct FailingResolver;

impl TtlResolver for FailingResolver {
    fn resolve_ttl(&self, fqdn: &str) -> DnsResult<u32> {
        Err(DnsGuardError::resolution(fqdn, "resolver unreachable"))
    }
}
