//! Node configuration
//!
//! Per LIFECYCLE_MODEL.md §3:
//! - `provider_type` and `version` are a fatal precondition for any run
//! - defaults mirror a freshly imaged node: localhost DNS, 60s TTL limit,
//!   admin user `root`, empty application/replication credentials
//!
//! Configuration is read from a JSON file, immutable for the duration of a
//! run. The persisted role state lives in the state store, not here.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Per LIFECYCLE_MODEL.md §3 step 1: fatal, nothing else may run.
    #[error("provider for the database resource not set: provider_type and version are both required")]
    ProviderNotSet,
}

/// A user/password pair for one credential tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// A tier with an empty username is absent from this deployment.
    pub fn is_set(&self) -> bool {
        !self.user.is_empty()
    }
}

/// Master discovery DNS settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsConfig {
    /// Master discovery name. `localhost` means no external DNS is in play
    /// and the TTL guard is bypassed (LIFECYCLE_MODEL.md §4).
    pub master_fqdn: String,

    /// Upper bound accepted for the master record's TTL, in seconds.
    pub ttl_limit_secs: u32,

    /// Optional slave discovery name. Informational; no guard applies.
    pub slave_fqdn: String,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            master_fqdn: "localhost".to_string(),
            ttl_limit_secs: 60,
            slave_fqdn: String::new(),
        }
    }
}

/// Backup lineage settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    /// Backup chain identifier used when restoring a new slave.
    pub lineage: String,

    /// When set, restores use this lineage instead of `lineage`.
    pub lineage_override: String,

    /// Optional fixed backup timestamp to restore from.
    pub timestamp_override: String,
}

impl BackupConfig {
    /// The lineage a restore should actually use.
    pub fn effective_lineage(&self) -> &str {
        if self.lineage_override.is_empty() {
            &self.lineage
        } else {
            &self.lineage_override
        }
    }
}

/// Paths of the operator-supplied hook executables that implement the
/// external capabilities (install, register, tag, grant).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    pub install: Option<PathBuf>,
    pub register_master: Option<PathBuf>,
    pub register_slave: Option<PathBuf>,
    pub publish_tag: Option<PathBuf>,
    pub grant_role: Option<PathBuf>,
}

/// Full node configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Name of the external database-engine provider (e.g. `postgres`).
    pub provider_type: String,

    /// Target engine version.
    pub version: String,

    /// Data directory passed to the install capability.
    pub data_dir: PathBuf,

    /// Admin credentials, used for install and the administrator grant.
    pub admin: Credentials,

    /// Optional application-tier credentials.
    pub application: Credentials,

    /// Optional replication credentials.
    pub replication: Credentials,

    pub dns: DnsConfig,
    pub backup: BackupConfig,
    pub hooks: HookConfig,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            provider_type: String::new(),
            version: String::new(),
            data_dir: PathBuf::from("/mnt/storage"),
            admin: Credentials::new("root", ""),
            application: Credentials::default(),
            replication: Credentials::default(),
            dns: DnsConfig::default(),
            backup: BackupConfig::default(),
            hooks: HookConfig::default(),
        }
    }
}

impl NodeConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check the provider precondition.
    ///
    /// Per LIFECYCLE_MODEL.md §3 step 1: both `provider_type` and `version`
    /// must be set before any side-effecting step runs.
    pub fn validate_provider(&self) -> Result<(), ConfigError> {
        if self.provider_type.is_empty() || self.version.is_empty() {
            return Err(ConfigError::ProviderNotSet);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_mirror_fresh_image() {
        let config = NodeConfig::default();
        assert_eq!(config.dns.master_fqdn, "localhost");
        assert_eq!(config.dns.ttl_limit_secs, 60);
        assert_eq!(config.admin.user, "root");
        assert_eq!(config.data_dir, PathBuf::from("/mnt/storage"));
        assert!(!config.application.is_set());
        assert!(!config.replication.is_set());
    }

    #[test]
    fn test_provider_precondition() {
        let mut config = NodeConfig::default();
        assert!(config.validate_provider().is_err());

        config.provider_type = "postgres".to_string();
        assert!(config.validate_provider().is_err());

        config.version = "9.1".to_string();
        assert!(config.validate_provider().is_ok());
    }

    #[test]
    fn test_version_alone_is_not_enough() {
        let config = NodeConfig {
            version: "9.1".to_string(),
            ..NodeConfig::default()
        };
        assert!(matches!(
            config.validate_provider(),
            Err(ConfigError::ProviderNotSet)
        ));
    }

    #[test]
    fn test_effective_lineage_prefers_override() {
        let mut backup = BackupConfig {
            lineage: "prod-db".to_string(),
            ..BackupConfig::default()
        };
        assert_eq!(backup.effective_lineage(), "prod-db");

        backup.lineage_override = "dr-restore".to_string();
        assert_eq!(backup.effective_lineage(), "dr-restore");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: NodeConfig = serde_json::from_str(
            r#"{"provider_type": "postgres", "version": "9.1", "backup": {"lineage": "L1"}}"#,
        )
        .unwrap();
        assert_eq!(config.provider_type, "postgres");
        assert_eq!(config.backup.lineage, "L1");
        assert_eq!(config.dns.master_fqdn, "localhost");
        assert_eq!(config.admin.user, "root");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = NodeConfig::load(Path::new("/nonexistent/dbsteward.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
