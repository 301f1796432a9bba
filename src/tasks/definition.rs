//! Task identity and definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Group used for tasks the build does not assign to any group.
pub const DEFAULT_GROUP: &str = "other";

/// Stable identifier of a discovered task.
///
/// Derived from the workspace root, the project folder and the script, so it
/// survives rediscovery and does not depend on arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Derive the id of a task.
    #[must_use]
    pub fn derive(workspace_folder: &Path, project_folder: &Path, script: &str) -> Self {
        Self(format!(
            "{}#{}#{}",
            workspace_folder.display(),
            project_folder.display(),
            script
        ))
    }

    /// Wrap an id read back from storage.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize an argument string.
///
/// Arguments are trimmed; an empty result means "no arguments".
///
/// # Example
///
/// ```
/// use gradle_pins::tasks::normalize_args;
///
/// assert_eq!(normalize_args(Some("--info ")), Some("--info".to_string()));
/// assert_eq!(normalize_args(Some("   ")), None);
/// assert_eq!(normalize_args(None), None);
/// ```
#[must_use]
pub fn normalize_args(args: Option<&str>) -> Option<String> {
    args.map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
}

/// A task discovered in a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
    pub id: TaskId,
    /// Task path without the leading `:`, e.g. `assemble` or `app:assemble`.
    pub script: String,
    pub description: String,
    pub group: String,
    /// Name of the project owning the task.
    pub project: String,
    pub project_folder: PathBuf,
    /// Name of the root project of the build.
    pub root_project: String,
    pub workspace_folder: PathBuf,
    pub build_file: PathBuf,
    /// Default arguments carried by the definition itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
}

impl TaskDefinition {
    /// Create a definition, deriving its id.
    #[must_use]
    pub fn new(
        workspace_folder: impl Into<PathBuf>,
        project_folder: impl Into<PathBuf>,
        script: impl Into<String>,
    ) -> Self {
        let workspace_folder = workspace_folder.into();
        let project_folder = project_folder.into();
        let script = script.into();
        let id = TaskId::derive(&workspace_folder, &project_folder, &script);
        let build_file = project_folder.join("build.gradle");
        Self {
            id,
            script,
            description: String::new(),
            group: DEFAULT_GROUP.to_string(),
            project: String::new(),
            project_folder,
            root_project: String::new(),
            workspace_folder,
            build_file,
            args: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    #[must_use]
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    #[must_use]
    pub fn with_root_project(mut self, root_project: impl Into<String>) -> Self {
        self.root_project = root_project.into();
        self
    }

    #[must_use]
    pub fn with_build_file(mut self, build_file: impl Into<PathBuf>) -> Self {
        self.build_file = build_file.into();
        self
    }

    #[must_use]
    pub fn with_args(mut self, args: &str) -> Self {
        self.args = normalize_args(Some(args));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_ignores_args() {
        let bare = TaskDefinition::new("/w", "/w", "assemble");
        let with_args = TaskDefinition::new("/w", "/w", "assemble").with_args("--info");
        assert_eq!(bare.id, with_args.id);
    }

    #[test]
    fn test_id_differs_per_root() {
        let a = TaskId::derive(Path::new("/a"), Path::new("/a"), "build");
        let b = TaskId::derive(Path::new("/b"), Path::new("/b"), "build");
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = TaskId::from_raw("x#y#z");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"x#y#z\"");
    }

    #[test]
    fn test_normalize_args_trims_inner_content_kept() {
        assert_eq!(
            normalize_args(Some("  --info  --stacktrace ")),
            Some("--info  --stacktrace".to_string())
        );
    }

    #[test]
    fn test_with_args_empty_is_none() {
        let def = TaskDefinition::new("/w", "/w", "build").with_args("  ");
        assert!(def.args.is_none());
    }
}
