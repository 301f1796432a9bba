//! Build backend that reads a cached "describe build" result from disk.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use super::build::GradleBuild;
use crate::host::BuildClient;
use crate::workspace::RootProject;

/// Default name of the build description file inside a root project.
pub const DEFAULT_BUILD_DESCRIPTION_FILE: &str = "build-description.json";

/// Reads `<root>/<file_name>` as a [`GradleBuild`].
#[derive(Debug, Clone)]
pub struct FileBuildClient {
    file_name: PathBuf,
}

impl Default for FileBuildClient {
    fn default() -> Self {
        Self::new(DEFAULT_BUILD_DESCRIPTION_FILE)
    }
}

impl FileBuildClient {
    #[must_use]
    pub fn new(file_name: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

#[async_trait]
impl BuildClient for FileBuildClient {
    async fn get_build(&self, root_project: &RootProject) -> Result<GradleBuild> {
        let path = root_project.project_path().join(&self.file_name);
        debug!(path = %path.display(), "Reading build description");

        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read build description: {}", path.display()))?;
        let build = serde_json::from_str(&content)
            .with_context(|| format!("Invalid build description: {}", path.display()))?;
        Ok(build)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::WorkspaceFolder;
    use tempfile::TempDir;

    fn root_at(temp: &TempDir) -> RootProject {
        RootProject::new(WorkspaceFolder::from_path(0, temp.path()))
    }

    #[tokio::test]
    async fn test_reads_build_description() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(DEFAULT_BUILD_DESCRIPTION_FILE),
            r#"{"project": {"name": "demo", "isRoot": true,
                "tasks": [{"name": "build", "path": ":build"}]}}"#,
        )
        .unwrap();

        let build = FileBuildClient::default()
            .get_build(&root_at(&temp))
            .await
            .unwrap();
        assert_eq!(build.project.unwrap().tasks[0].script(), "build");
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let err = FileBuildClient::default()
            .get_build(&root_at(&temp))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read build description"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("custom.json"), "not json").unwrap();
        let err = FileBuildClient::new("custom.json")
            .get_build(&root_at(&temp))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid build description"));
    }
}
