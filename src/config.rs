//! Configuration for gradle-pins.
//!
//! Settings live in `<workspace>/.gradle-pins/settings.json`. Every field is
//! optional; a missing file yields the defaults.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{PinError, Result};
use crate::pins::persistence::STATE_FILENAME;
use crate::pins::DEFAULT_PINNED_TASKS_KEY;
use crate::tasks::client::DEFAULT_BUILD_DESCRIPTION_FILE;
use crate::workspace::WorkspaceFolder;

/// Directory holding settings and state inside a workspace.
pub const CONFIG_DIR: &str = ".gradle-pins";

/// Settings file name inside [`CONFIG_DIR`].
pub const SETTINGS_FILENAME: &str = "settings.json";

/// A workspace folder entry in `settings.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderConfig {
    /// Display name; defaults to the last path component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Folder path, relative paths are resolved against the workspace.
    pub path: PathBuf,
}

/// Extension configuration loaded from `.gradle-pins/settings.json`.
///
/// # Example settings.json
///
/// ```json
/// {
///   "workspaceFolders": [
///     { "path": "app" },
///     { "name": "lib", "path": "../shared-lib" }
///   ],
///   "pinnedTasksKey": "pinnedTasks"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionConfig {
    /// Folders of the workspace. Empty means the workspace itself.
    #[serde(default)]
    pub workspace_folders: Vec<FolderConfig>,

    /// Where pinned tasks are persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_path: Option<PathBuf>,

    #[serde(default = "default_build_description_file")]
    pub build_description_file: String,

    /// Key of the pinned task list in the state store.
    #[serde(default = "default_pinned_tasks_key")]
    pub pinned_tasks_key: String,

    /// Directory holding the light/dark icon sets.
    #[serde(default = "default_resources_dir")]
    pub resources_dir: PathBuf,
}

fn default_build_description_file() -> String {
    DEFAULT_BUILD_DESCRIPTION_FILE.to_string()
}

fn default_pinned_tasks_key() -> String {
    DEFAULT_PINNED_TASKS_KEY.to_string()
}

fn default_resources_dir() -> PathBuf {
    PathBuf::from("resources")
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            workspace_folders: Vec::new(),
            state_path: None,
            build_description_file: default_build_description_file(),
            pinned_tasks_key: default_pinned_tasks_key(),
            resources_dir: default_resources_dir(),
        }
    }
}

impl ExtensionConfig {
    /// Load configuration from a workspace directory.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the settings file exists but cannot
    /// be read or parsed.
    pub fn load(workspace: &Path) -> Result<Self> {
        let settings_path = Self::settings_path(workspace);

        if !settings_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&settings_path).map_err(|e| {
            PinError::config_with_path(
                format!("Failed to read settings: {}", e),
                settings_path.clone(),
            )
        })?;
        serde_json::from_str(&content).map_err(|e| {
            PinError::config_with_path(format!("Invalid settings: {}", e), settings_path)
        })
    }

    /// Get the settings.json path for a workspace
    #[must_use]
    pub fn settings_path(workspace: &Path) -> PathBuf {
        workspace.join(CONFIG_DIR).join(SETTINGS_FILENAME)
    }

    /// Path of the state file for a workspace.
    #[must_use]
    pub fn state_path(&self, workspace: &Path) -> PathBuf {
        match &self.state_path {
            Some(path) => resolve(workspace, path),
            None => workspace.join(CONFIG_DIR).join(STATE_FILENAME),
        }
    }

    /// State file shared by every workspace, under the user data directory.
    #[must_use]
    pub fn global_state_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("gradle-pins").join(STATE_FILENAME))
    }

    /// Icon directory resolved against the workspace.
    #[must_use]
    pub fn resources_dir(&self, workspace: &Path) -> PathBuf {
        resolve(workspace, &self.resources_dir)
    }

    /// Workspace folders in configuration order.
    #[must_use]
    pub fn folders(&self, workspace: &Path) -> Vec<WorkspaceFolder> {
        if self.workspace_folders.is_empty() {
            return vec![WorkspaceFolder::from_path(0, workspace)];
        }

        self.workspace_folders
            .iter()
            .enumerate()
            .map(|(index, folder)| {
                let path = resolve(workspace, &folder.path);
                match &folder.name {
                    Some(name) => WorkspaceFolder::new(index, name.clone(), path),
                    None => WorkspaceFolder::from_path(index, path),
                }
            })
            .collect()
    }

    /// Check the configuration for values that cannot work.
    ///
    /// # Errors
    ///
    /// Returns [`PinError::InvalidConfig`] for an empty state key, an empty
    /// build description file name, an empty folder path, or two folders with
    /// the same name.
    pub fn validate(&self, workspace: &Path) -> Result<()> {
        if self.pinned_tasks_key.trim().is_empty() {
            return Err(invalid("pinnedTasksKey", "must not be empty"));
        }
        if self.build_description_file.trim().is_empty() {
            return Err(invalid("buildDescriptionFile", "must not be empty"));
        }
        if self
            .workspace_folders
            .iter()
            .any(|f| f.path.as_os_str().is_empty())
        {
            return Err(invalid("workspaceFolders", "folder path must not be empty"));
        }

        let mut seen = HashSet::new();
        for folder in self.folders(workspace) {
            if !seen.insert(folder.name.clone()) {
                return Err(invalid(
                    "workspaceFolders",
                    &format!("duplicate folder name '{}'", folder.name),
                ));
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> PinError {
    PinError::InvalidConfig {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn resolve(workspace: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        workspace.join(path)
    }
}
