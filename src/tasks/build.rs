//! Build description returned by the build backend.
//!
//! This mirrors the "describe build" response: a root project with its tasks
//! and nested subprojects.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of describing one root build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradleBuild {
    #[serde(default)]
    pub project: Option<GradleProject>,
}

impl GradleBuild {
    #[must_use]
    pub fn new(project: GradleProject) -> Self {
        Self {
            project: Some(project),
        }
    }
}

/// A project of the build with its tasks and subprojects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradleProject {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_root: bool,
    /// Directory of the project, relative to the root build when not absolute.
    #[serde(default)]
    pub project_folder: Option<PathBuf>,
    #[serde(default)]
    pub tasks: Vec<GradleTask>,
    #[serde(default)]
    pub projects: Vec<GradleProject>,
}

/// A task as reported by the build backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradleTask {
    pub name: String,
    /// Full task path, e.g. `:app:assemble`.
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub build_file: Option<PathBuf>,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub root_project: String,
}

impl GradleTask {
    /// Script used to run the task: the path without its leading `:`.
    ///
    /// Falls back to the task name when the backend reports no path.
    #[must_use]
    pub fn script(&self) -> &str {
        let path = self.path.trim_start_matches(':');
        if path.is_empty() {
            &self.name
        } else {
            path
        }
    }
}
