//! Hook-command collaborators
//!
//! Production deployments implement the external capabilities as operator
//! executables configured under `hooks` in the config file. Each hook is
//! invoked synchronously; a non-zero exit is the collaborator's failure,
//! with stderr carried in the error message.
//!
//! Passwords travel in the environment, never in argv.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::HookConfig;
use crate::privileges::{GrantError, GrantExecutor};

use super::collaborators::{
    DatabaseProvider, InstallError, RegistrationError, Registrar, TagError, TagPublisher,
};
use super::errors::{LifecycleError, LifecycleResult};

/// Environment variable carrying the admin password for the install hook.
pub const ENV_ADMIN_PASSWORD: &str = "DBSTEWARD_ADMIN_PASSWORD";

/// Environment variable carrying the grant password for the grant hook.
pub const ENV_GRANT_PASSWORD: &str = "DBSTEWARD_GRANT_PASSWORD";

/// One configured hook executable.
#[derive(Debug, Clone)]
struct HookCommand {
    program: PathBuf,
}

impl HookCommand {
    fn new(program: PathBuf) -> Self {
        Self { program }
    }

    /// Run the hook to completion. Returns stderr-laden message on failure.
    fn invoke(&self, args: &[&str], env: &[(&str, &str)]) -> Result<(), String> {
        let mut command = Command::new(&self.program);
        command.args(args);
        for (key, value) in env {
            command.env(key, value);
        }

        let output = command
            .output()
            .map_err(|e| format!("failed to run {}: {}", self.program.display(), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            ));
        }

        Ok(())
    }
}

/// Install capability backed by the `install` hook.
#[derive(Debug)]
pub struct HookProvider {
    hook: HookCommand,
}

impl DatabaseProvider for HookProvider {
    fn install(
        &self,
        data_dir: &Path,
        admin_user: &str,
        admin_password: &str,
    ) -> Result<(), InstallError> {
        let data_dir = data_dir.display().to_string();
        self.hook
            .invoke(
                &[data_dir.as_str(), admin_user],
                &[(ENV_ADMIN_PASSWORD, admin_password)],
            )
            .map_err(InstallError::new)
    }
}

/// Registration capability backed by the `register_master` and
/// `register_slave` hooks.
#[derive(Debug)]
pub struct HookRegistrar {
    master: HookCommand,
    slave: HookCommand,
}

impl Registrar for HookRegistrar {
    fn register_master(&self, restore: bool) -> Result<(), RegistrationError> {
        let restore_arg = if restore { "restore" } else { "no-restore" };
        self.master
            .invoke(&[restore_arg], &[])
            .map_err(RegistrationError::new)
    }

    fn register_slave(&self, restore: bool, lineage: &str) -> Result<(), RegistrationError> {
        let restore_arg = if restore { "restore" } else { "no-restore" };
        self.slave
            .invoke(&[restore_arg, lineage], &[])
            .map_err(RegistrationError::new)
    }
}

/// Tag capability backed by the `publish_tag` hook.
#[derive(Debug)]
pub struct HookTagPublisher {
    hook: HookCommand,
}

impl TagPublisher for HookTagPublisher {
    fn publish_tag(&self, key: &str, value: &str) -> Result<(), TagError> {
        self.hook.invoke(&[key, value], &[]).map_err(TagError::new)
    }
}

/// Grant capability backed by the `grant_role` hook.
#[derive(Debug)]
pub struct HookGrantExecutor {
    hook: HookCommand,
}

impl GrantExecutor for HookGrantExecutor {
    fn grant_role(&self, username: &str, password: &str, role: &str) -> Result<(), GrantError> {
        self.hook
            .invoke(&[role, username], &[(ENV_GRANT_PASSWORD, password)])
            .map_err(GrantError::new)
    }
}

/// The full set of hook-backed collaborators for a production run.
#[derive(Debug)]
pub struct HookCollaborators {
    pub provider: HookProvider,
    pub registrar: HookRegistrar,
    pub tags: HookTagPublisher,
    pub grants: HookGrantExecutor,
}

impl HookCollaborators {
    /// Wire all collaborators from config. Every hook must be configured;
    /// a missing one is a configuration error naming it.
    pub fn from_config(hooks: &HookConfig) -> LifecycleResult<Self> {
        Ok(Self {
            provider: HookProvider {
                hook: required(&hooks.install, "install")?,
            },
            registrar: HookRegistrar {
                master: required(&hooks.register_master, "register_master")?,
                slave: required(&hooks.register_slave, "register_slave")?,
            },
            tags: HookTagPublisher {
                hook: required(&hooks.publish_tag, "publish_tag")?,
            },
            grants: HookGrantExecutor {
                hook: required(&hooks.grant_role, "grant_role")?,
            },
        })
    }
}

fn required(path: &Option<PathBuf>, name: &str) -> LifecycleResult<HookCommand> {
    path.clone()
        .map(HookCommand::new)
        .ok_or_else(|| LifecycleError::configuration(format!("hook not configured: {}", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_hooks() -> HookConfig {
        HookConfig {
            install: Some(PathBuf::from("/opt/hooks/install")),
            register_master: Some(PathBuf::from("/opt/hooks/register_master")),
            register_slave: Some(PathBuf::from("/opt/hooks/register_slave")),
            publish_tag: Some(PathBuf::from("/opt/hooks/publish_tag")),
            grant_role: Some(PathBuf::from("/opt/hooks/grant_role")),
        }
    }

    #[test]
    fn test_wiring_succeeds_with_all_hooks() {
        assert!(HookCollaborators::from_config(&all_hooks()).is_ok());
    }

    #[test]
    fn test_missing_hook_names_the_hook() {
        let mut hooks = all_hooks();
        hooks.register_slave = None;

        let err = HookCollaborators::from_config(&hooks).unwrap_err();
        match err {
            LifecycleError::Configuration(message) => {
                assert!(message.contains("register_slave"));
            }
            other => panic!("expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_hook_binary_surfaces_as_install_error() {
        let provider = HookProvider {
            hook: HookCommand::new(PathBuf::from("/nonexistent/hook")),
        };
        let result = provider.install(Path::new("/mnt/storage"), "root", "pw");
        assert!(result.is_err());
    }
}
