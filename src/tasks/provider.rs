//! Task discovery: asks the build backend about every root project and
//! keeps the resulting catalog.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use futures::future::join_all;
use tracing::{debug, info, warn};

use super::catalog::TaskCatalog;
use super::definition::{TaskDefinition, TaskId};
use crate::error::{IntoPinError, PinError, Result};
use crate::host::BuildClient;
use crate::workspace::RootProjectsStore;

/// Owns the current task catalog and the set of running tasks.
pub struct GradleTaskProvider {
    client: Arc<dyn BuildClient>,
    catalog: RwLock<Arc<TaskCatalog>>,
    running: RwLock<HashSet<TaskId>>,
    failures: RwLock<Vec<String>>,
}

impl std::fmt::Debug for GradleTaskProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GradleTaskProvider")
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

impl GradleTaskProvider {
    /// Create a provider with an empty catalog.
    #[must_use]
    pub fn new(client: Arc<dyn BuildClient>) -> Self {
        Self {
            client,
            catalog: RwLock::new(Arc::new(TaskCatalog::empty())),
            running: RwLock::new(HashSet::new()),
            failures: RwLock::new(Vec::new()),
        }
    }

    /// Discover tasks for every root project and replace the catalog.
    ///
    /// Builds are described concurrently and all requests run to
    /// completion. A root whose description fails contributes no tasks; the
    /// failure is logged and discovery carries on with the other roots.
    ///
    /// # Errors
    ///
    /// Returns an error only if the catalog lock is poisoned.
    pub async fn load_tasks(&self, roots: &RootProjectsStore) -> Result<Arc<TaskCatalog>> {
        let requests = roots.get_all().iter().map(|root| {
            let client = Arc::clone(&self.client);
            async move { (root.clone(), client.get_build(root).await) }
        });

        let mut builds = Vec::new();
        let mut failures = Vec::new();
        for (root, result) in join_all(requests).await {
            match result.into_pin_backend(root.project_path()) {
                Ok(build) => builds.push((root, build)),
                Err(e) => {
                    warn!("{}", e);
                    failures.push(e.to_string());
                }
            }
        }

        let catalog = Arc::new(TaskCatalog::from_builds(builds));
        info!(
            roots = roots.len(),
            tasks = catalog.task_count(),
            "Loaded tasks"
        );

        *self
            .catalog
            .write()
            .map_err(|_| PinError::poisoned("task catalog"))? = Arc::clone(&catalog);
        *self
            .failures
            .write()
            .map_err(|_| PinError::poisoned("discovery failures"))? = failures;
        Ok(catalog)
    }

    /// Backend errors of the roots the last discovery had to skip.
    #[must_use]
    pub fn failures(&self) -> Vec<String> {
        self.failures
            .read()
            .map(|f| f.clone())
            .unwrap_or_default()
    }

    /// The current catalog snapshot.
    ///
    /// Falls back to an empty catalog if the lock is poisoned.
    #[must_use]
    pub fn catalog(&self) -> Arc<TaskCatalog> {
        match self.catalog.read() {
            Ok(catalog) => Arc::clone(&catalog),
            Err(_) => {
                warn!("Task catalog lock poisoned, treating catalog as empty");
                Arc::new(TaskCatalog::empty())
            }
        }
    }

    /// Find a task of the current catalog by id.
    #[must_use]
    pub fn find_by_id(&self, id: &TaskId) -> Option<TaskDefinition> {
        self.catalog().resolve(id).cloned()
    }

    /// Mark a task as running or idle.
    pub fn set_running(&self, id: &TaskId, running: bool) {
        let Ok(mut set) = self.running.write() else {
            warn!("Running tasks lock poisoned");
            return;
        };
        if running {
            set.insert(id.clone());
        } else {
            set.remove(id);
        }
        debug!(id = %id, running, "Task run state changed");
    }

    #[must_use]
    pub fn is_running(&self, id: &TaskId) -> bool {
        self.running
            .read()
            .map(|set| set.contains(id))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::{mock_gradle_build, mock_task_definition, mock_workspace_folder};
    use crate::testing::MockBuildClient;

    fn roots(names: &[&str]) -> RootProjectsStore {
        let mut store = RootProjectsStore::new();
        store.populate(
            names
                .iter()
                .enumerate()
                .map(|(i, n)| mock_workspace_folder(i, n, n)),
        );
        store
    }

    #[tokio::test]
    async fn test_load_tasks_populates_catalog() {
        let folder = mock_workspace_folder(0, "folder1", "folder1");
        let def = mock_task_definition(&folder, "assemble1", "Description 1", None);
        let client = MockBuildClient::new().with_build(mock_gradle_build(&[&def]));
        let provider = GradleTaskProvider::new(Arc::new(client));

        assert!(provider.catalog().is_empty());
        provider.load_tasks(&roots(&["folder1"])).await.unwrap();

        let found = provider.find_by_id(&def.id).expect("task should resolve");
        assert_eq!(found.script, "assemble1");
        assert_eq!(found.description, "Description 1");
    }

    #[tokio::test]
    async fn test_failing_root_is_skipped() {
        let folder = mock_workspace_folder(0, "folder1", "folder1");
        let def = mock_task_definition(&folder, "assemble1", "Description 1", None);
        let client = MockBuildClient::new()
            .with_build(mock_gradle_build(&[&def]))
            .with_error_for("folder2", "connection refused");
        let provider = GradleTaskProvider::new(Arc::new(client));

        let catalog = provider
            .load_tasks(&roots(&["folder1", "folder2"]))
            .await
            .unwrap();

        assert_eq!(catalog.root_projects().len(), 1);
        assert_eq!(catalog.task_count(), 1);

        let failures = provider.failures();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].starts_with("Build backend error for folder2"));
        assert!(failures[0].contains("connection refused"));
    }

    #[tokio::test]
    async fn test_reload_clears_failures() {
        let client = MockBuildClient::new().with_error_for("folder1", "offline");
        let provider = GradleTaskProvider::new(Arc::new(client));

        provider.load_tasks(&roots(&["folder1"])).await.unwrap();
        assert_eq!(provider.failures().len(), 1);

        provider.load_tasks(&roots(&[])).await.unwrap();
        assert!(provider.failures().is_empty());
    }

    #[tokio::test]
    async fn test_reload_replaces_catalog() {
        let folder = mock_workspace_folder(0, "folder1", "folder1");
        let def = mock_task_definition(&folder, "assemble1", "Description 1", None);
        let client = Arc::new(MockBuildClient::new().with_build(mock_gradle_build(&[&def])));
        let provider = GradleTaskProvider::new(client.clone());

        provider.load_tasks(&roots(&["folder1"])).await.unwrap();
        assert!(provider.find_by_id(&def.id).is_some());

        provider.load_tasks(&roots(&[])).await.unwrap();
        assert!(provider.find_by_id(&def.id).is_none());
        assert_eq!(client.call_count(), 1);
    }

    #[test]
    fn test_running_state() {
        let provider = GradleTaskProvider::new(Arc::new(MockBuildClient::new()));
        let id = TaskId::from_raw("a#a#build");
        assert!(!provider.is_running(&id));
        provider.set_running(&id, true);
        assert!(provider.is_running(&id));
        provider.set_running(&id, false);
        assert!(!provider.is_running(&id));
    }
}
