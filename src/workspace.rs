//! Workspace folders and the root projects discovered in them.
//!
//! Each configured workspace folder hosts exactly one root project. Whether
//! the workspace is "multi-root" decides how the pinned tasks view groups its
//! nodes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A folder opened in the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceFolder {
    /// Position of the folder in the workspace.
    pub index: usize,
    /// Display name of the folder.
    pub name: String,
    /// Absolute (or workspace-relative) path of the folder.
    pub path: PathBuf,
}

impl WorkspaceFolder {
    /// Create a workspace folder.
    #[must_use]
    pub fn new(index: usize, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            index,
            name: name.into(),
            path: path.into(),
        }
    }

    /// Create a workspace folder named after the last path component.
    #[must_use]
    pub fn from_path(index: usize, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { index, name, path }
    }
}

/// The entry point of a build tree, one per workspace folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootProject {
    workspace_folder: WorkspaceFolder,
    project_path: PathBuf,
}

impl RootProject {
    /// Create a root project living at the root of a workspace folder.
    #[must_use]
    pub fn new(workspace_folder: WorkspaceFolder) -> Self {
        let project_path = workspace_folder.path.clone();
        Self {
            workspace_folder,
            project_path,
        }
    }

    /// The workspace folder hosting this root project.
    #[must_use]
    pub fn workspace_folder(&self) -> &WorkspaceFolder {
        &self.workspace_folder
    }

    /// Directory of the root build.
    #[must_use]
    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    /// Name shown for this root project in tree views.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.workspace_folder.name
    }

    /// Identity used to group pinned tasks by root project.
    #[must_use]
    pub fn key(&self) -> &Path {
        &self.project_path
    }
}

/// The set of root projects for the current workspace.
#[derive(Debug, Clone, Default)]
pub struct RootProjectsStore {
    root_projects: Vec<RootProject>,
}

impl RootProjectsStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the root projects with one per workspace folder.
    pub fn populate(&mut self, folders: impl IntoIterator<Item = WorkspaceFolder>) {
        self.root_projects = folders.into_iter().map(RootProject::new).collect();
        tracing::debug!(count = self.root_projects.len(), "Populated root projects");
    }

    /// All root projects in workspace folder order.
    #[must_use]
    pub fn get_all(&self) -> &[RootProject] {
        &self.root_projects
    }

    /// Look up a root project by its key.
    #[must_use]
    pub fn get(&self, key: &Path) -> Option<&RootProject> {
        self.root_projects.iter().find(|r| r.key() == key)
    }

    /// Anything but exactly one configured root project.
    #[must_use]
    pub fn is_multi_root(&self) -> bool {
        self.root_projects.len() != 1
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.root_projects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root_projects.is_empty()
    }
}
