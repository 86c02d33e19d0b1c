//! Durable node state store
//!
//! Persists the role state and the drawn backup schedule as one JSON
//! document. The written state is what a rebooted node trusts, so writes
//! are atomic: temp file, fsync, rename, directory fsync. A crash mid-write
//! leaves either the old document or the new one, never a torn file.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schedule::BackupSchedule;

use super::errors::{LifecycleError, LifecycleResult};
use super::state::NodeRoleState;

const STATE_FILE_NAME: &str = "node_state.json";

/// The persisted document: role state plus the once-drawn backup schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedNode {
    pub state: NodeRoleState,

    /// `None` until the jitter schedule has been drawn for this node.
    pub backup_schedule: Option<BackupSchedule>,

    pub written_at: DateTime<Utc>,
}

impl PersistedNode {
    pub fn new(state: NodeRoleState) -> Self {
        Self {
            state,
            backup_schedule: None,
            written_at: Utc::now(),
        }
    }
}

/// Atomic JSON store for the node document.
pub struct StateStore {
    state_path: PathBuf,
    temp_path: PathBuf,
}

impl StateStore {
    pub fn new(state_dir: &Path) -> Self {
        Self {
            state_path: state_dir.join(STATE_FILE_NAME),
            temp_path: state_dir.join(format!("{}.tmp", STATE_FILE_NAME)),
        }
    }

    /// Read the persisted document if present.
    pub fn load(&self) -> LifecycleResult<Option<PersistedNode>> {
        if !self.state_path.exists() {
            return Ok(None);
        }

        let mut file = File::open(&self.state_path)
            .map_err(|e| LifecycleError::state_store(format!("failed to open state file: {}", e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| LifecycleError::state_store(format!("failed to read state file: {}", e)))?;

        let node = serde_json::from_str(&content)
            .map_err(|e| LifecycleError::state_store(format!("failed to parse state file: {}", e)))?;

        Ok(Some(node))
    }

    /// Read the persisted document, or the first-boot default if absent.
    pub fn load_or_init(&self) -> LifecycleResult<PersistedNode> {
        Ok(self
            .load()?
            .unwrap_or_else(|| PersistedNode::new(NodeRoleState::uninitialized())))
    }

    /// Write the document atomically.
    pub fn save(&self, node: &PersistedNode) -> LifecycleResult<()> {
        if let Some(parent) = self.state_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                LifecycleError::state_store(format!("failed to create state directory: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(node)
            .map_err(|e| LifecycleError::state_store(format!("failed to serialize state: {}", e)))?;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.temp_path)
            .map_err(|e| {
                LifecycleError::state_store(format!("failed to create temp state file: {}", e))
            })?;

        file.write_all(content.as_bytes())
            .map_err(|e| LifecycleError::state_store(format!("failed to write state: {}", e)))?;

        file.sync_all()
            .map_err(|e| LifecycleError::state_store(format!("failed to fsync state file: {}", e)))?;

        fs::rename(&self.temp_path, &self.state_path).map_err(|e| {
            LifecycleError::state_store(format!("failed to commit state file: {}", e))
        })?;

        // Make the rename itself durable
        if let Some(parent) = self.state_path.parent() {
            if let Ok(dir) = File::open(parent) {
                let _ = dir.sync_all();
            }
        }

        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.state_path.exists()
    }

    /// Path of the state file (diagnostics).
    pub fn state_path(&self) -> &Path {
        &self.state_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let store = StateStore::new(tmp.path());

        let mut node = PersistedNode::new(NodeRoleState::initialized_slave());
        node.backup_schedule = Some(schedule::generate(9));
        store.save(&node).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, node);
    }

    #[test]
    fn test_load_absent_returns_none() {
        let tmp = TempDir::new().unwrap();
        let store = StateStore::new(tmp.path());
        assert!(store.load().unwrap().is_none());
        assert!(!store.exists());
    }

    #[test]
    fn test_load_or_init_defaults_to_uninitialized() {
        let tmp = TempDir::new().unwrap();
        let store = StateStore::new(tmp.path());

        let node = store.load_or_init().unwrap();
        assert!(!node.state.is_initialized());
        assert!(node.backup_schedule.is_none());
    }

    #[test]
    fn test_save_overwrites_previous_document() {
        let tmp = TempDir::new().unwrap();
        let store = StateStore::new(tmp.path());

        store
            .save(&PersistedNode::new(NodeRoleState::uninitialized()))
            .unwrap();
        store
            .save(&PersistedNode::new(NodeRoleState::initialized_master()))
            .unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert!(loaded.state.is_master);
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let tmp = TempDir::new().unwrap();
        let store = StateStore::new(tmp.path());

        store
            .save(&PersistedNode::new(NodeRoleState::uninitialized()))
            .unwrap();

        assert!(!store.temp_path.exists());
        assert!(store.state_path.exists());
    }

    #[test]
    fn test_repeated_loads_are_identical() {
        let tmp = TempDir::new().unwrap();
        let store = StateStore::new(tmp.path());

        let mut node = PersistedNode::new(NodeRoleState::initialized_slave());
        node.backup_schedule = Some(schedule::generate(1234));
        store.save(&node).unwrap();

        assert_eq!(store.load().unwrap(), store.load().unwrap());
    }

    #[test]
    fn test_corrupt_state_file_is_store_error() {
        let tmp = TempDir::new().unwrap();
        let store = StateStore::new(tmp.path());

        fs::write(store.state_path(), "not json").unwrap();

        let result = store.load();
        assert!(matches!(result, Err(LifecycleError::StateStore(_))));
    }
}
