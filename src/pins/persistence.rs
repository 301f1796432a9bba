//! File-backed state store.
//!
//! All extension state lives in one JSON document:
//!
//! ```json
//! { "version": 1, "updatedAt": "...", "values": { "pinnedTasks": [...] } }
//! ```
//!
//! Writes go to a temporary file that is renamed over the real one.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::host::StateStore;

/// Current schema version of the state file.
pub const STATE_VERSION: u32 = 1;

/// Default filename of the state file.
pub const STATE_FILENAME: &str = "state.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateDocument {
    version: u32,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    values: BTreeMap<String, serde_json::Value>,
}

impl Default for StateDocument {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            updated_at: Utc::now(),
            values: BTreeMap::new(),
        }
    }
}

/// [`StateStore`] persisted as a JSON file.
#[derive(Debug)]
pub struct JsonFileStateStore {
    path: PathBuf,
    document: RwLock<StateDocument>,
}

impl JsonFileStateStore {
    /// Open the state file, starting fresh if it is missing, corrupted or
    /// from an unsupported version.
    ///
    /// # Errors
    ///
    /// Returns an error only for unexpected I/O failures.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let document = Self::read_document(&path)?.unwrap_or_default();
        Ok(Self {
            path,
            document: RwLock::new(document),
        })
    }

    fn read_document(path: &Path) -> Result<Option<StateDocument>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file: {}", path.display()))?;

        let document: StateDocument = match serde_json::from_str(&content) {
            Ok(d) => d,
            Err(e) => {
                warn!("State file is corrupted, starting fresh: {}", e);
                return Ok(None);
            }
        };

        if document.version != STATE_VERSION {
            warn!(
                "State file version {} is incompatible, starting fresh",
                document.version
            );
            return Ok(None);
        }

        Ok(Some(document))
    }

    /// Path of the state file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_document(&self, document: &StateDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| STATE_FILENAME.to_string());
        let temp_path = self.path.with_file_name(format!("{}.tmp", file_name));

        let json = serde_json::to_string_pretty(document).context("Failed to serialize state")?;
        std::fs::write(&temp_path, json)
            .with_context(|| format!("Failed to write state to: {}", temp_path.display()))?;
        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to replace state file: {}", self.path.display()))?;
        Ok(())
    }
}

impl StateStore for JsonFileStateStore {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        let document = self
            .document
            .read()
            .map_err(|_| anyhow!("State lock poisoned"))?;
        Ok(document.values.get(key).cloned())
    }

    fn set(&self, key: &str, value: serde_json::Value) -> Result<()> {
        let mut document = self
            .document
            .write()
            .map_err(|_| anyhow!("State lock poisoned"))?;
        let mut updated = document.clone();
        updated.values.insert(key.to_string(), value);
        updated.updated_at = Utc::now();
        self.write_document(&updated)?;
        *document = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStateStore::open(temp.path().join(STATE_FILENAME)).unwrap();
        assert!(store.get("pinnedTasks").unwrap().is_none());
    }

    #[test]
    fn test_set_persists_across_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join(STATE_FILENAME);

        let store = JsonFileStateStore::open(&path).unwrap();
        store
            .set("pinnedTasks", serde_json::json!([{ "id": "a" }]))
            .unwrap();
        assert!(path.exists());
        assert!(!path.with_file_name("state.json.tmp").exists());

        let reopened = JsonFileStateStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("pinnedTasks").unwrap(),
            Some(serde_json::json!([{ "id": "a" }]))
        );
    }

    #[test]
    fn test_corrupted_file_starts_fresh() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(STATE_FILENAME);
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStateStore::open(&path).unwrap();
        assert!(store.get("pinnedTasks").unwrap().is_none());

        store.set("pinnedTasks", serde_json::json!([])).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"version\": 1"));
    }

    #[test]
    fn test_incompatible_version_starts_fresh() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(STATE_FILENAME);
        std::fs::write(
            &path,
            r#"{"version": 99, "updatedAt": "2024-01-01T00:00:00Z", "values": {"k": 1}}"#,
        )
        .unwrap();

        let store = JsonFileStateStore::open(&path).unwrap();
        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn test_keys_are_independent() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStateStore::open(temp.path().join(STATE_FILENAME)).unwrap();
        store.set("a", serde_json::json!(1)).unwrap();
        store.set("b", serde_json::json!(2)).unwrap();
        assert_eq!(store.get("a").unwrap(), Some(serde_json::json!(1)));
        assert_eq!(store.get("b").unwrap(), Some(serde_json::json!(2)));
    }
}
