//! Test fixtures mirroring a small Gradle workspace.
//!
//! Two workspace folders, `folder1` and `folder2`, and a build with two
//! tasks that the mock backend reports for every root.

use std::sync::Arc;

use super::mocks::{MemoryStateStore, MockBuildClient};
use crate::pins::{PinnedTasksStore, DEFAULT_PINNED_TASKS_KEY};
use crate::tasks::{GradleBuild, GradleProject, GradleTask, GradleTaskProvider, TaskDefinition};
use crate::views::{GradleTasksProvider, Icons, PinnedTasksProvider, TaskNode, ViewNode};
use crate::workspace::{RootProjectsStore, WorkspaceFolder};

/// Create a workspace folder.
#[must_use]
pub fn mock_workspace_folder(index: usize, name: &str, path: &str) -> WorkspaceFolder {
    WorkspaceFolder::new(index, name, path)
}

/// Create a task definition of the root project in `folder`.
#[must_use]
pub fn mock_task_definition(
    folder: &WorkspaceFolder,
    script: &str,
    description: &str,
    args: Option<&str>,
) -> TaskDefinition {
    let mut definition = TaskDefinition::new(&folder.path, &folder.path, script)
        .with_description(description)
        .with_group("build")
        .with_project("project")
        .with_root_project("project");
    if let Some(args) = args {
        definition = definition.with_args(args);
    }
    definition
}

/// The backend's view of a task definition.
#[must_use]
pub fn mock_gradle_task(definition: &TaskDefinition) -> GradleTask {
    GradleTask {
        name: definition.script.clone(),
        path: format!(":{}", definition.script),
        group: Some(definition.group.clone()),
        description: Some(definition.description.clone()),
        build_file: None,
        project: definition.project.clone(),
        root_project: definition.root_project.clone(),
    }
}

/// A build whose root project holds the given tasks.
#[must_use]
pub fn mock_gradle_build(definitions: &[&TaskDefinition]) -> GradleBuild {
    GradleBuild::new(GradleProject {
        name: "project".to_string(),
        is_root: true,
        project_folder: None,
        tasks: definitions.iter().map(|d| mock_gradle_task(d)).collect(),
        projects: Vec::new(),
    })
}

/// A fully wired workspace: stores, discovery and both views.
pub struct TestWorkspace {
    pub folders: Vec<WorkspaceFolder>,
    pub client: Arc<MockBuildClient>,
    pub state: Arc<MemoryStateStore>,
    pub store: Arc<PinnedTasksStore>,
    pub root_projects: Arc<RootProjectsStore>,
    pub task_provider: Arc<GradleTaskProvider>,
    pub gradle_tasks: GradleTasksProvider,
    pub pinned: Arc<PinnedTasksProvider>,
}

impl TestWorkspace {
    /// Workspace with `folder1` only.
    ///
    /// # Panics
    ///
    /// Panics if task discovery fails.
    pub async fn single_root() -> Self {
        Self::with_folders(&["folder1"]).await
    }

    /// Workspace with `folder1` and `folder2`.
    ///
    /// # Panics
    ///
    /// Panics if task discovery fails.
    pub async fn multi_root() -> Self {
        Self::with_folders(&["folder1", "folder2"]).await
    }

    /// Workspace with one folder per name, tasks already loaded.
    ///
    /// # Panics
    ///
    /// Panics if task discovery fails.
    pub async fn with_folders(names: &[&str]) -> Self {
        let folder1 = mock_workspace_folder(0, "folder1", "folder1");
        let folder2 = mock_workspace_folder(1, "folder2", "folder2");
        let definition1 = mock_task_definition(&folder1, "assemble1", "Description 1", None);
        let definition2 =
            mock_task_definition(&folder2, "assemble2", "Description 2", Some("--info"));

        let folders: Vec<WorkspaceFolder> = names
            .iter()
            .enumerate()
            .map(|(i, name)| mock_workspace_folder(i, name, name))
            .collect();

        let mut root_projects = RootProjectsStore::new();
        root_projects.populate(folders.clone());
        let root_projects = Arc::new(root_projects);

        let client = Arc::new(
            MockBuildClient::new().with_build(mock_gradle_build(&[&definition1, &definition2])),
        );
        let task_provider = Arc::new(GradleTaskProvider::new(client.clone()));
        task_provider
            .load_tasks(&root_projects)
            .await
            .expect("Failed to load tasks");

        let state = Arc::new(MemoryStateStore::new());
        let store = Arc::new(
            PinnedTasksStore::load(state.clone(), DEFAULT_PINNED_TASKS_KEY)
                .expect("Failed to load pinned tasks"),
        );

        let icons = Icons::default();
        let gradle_tasks = GradleTasksProvider::new(
            root_projects.clone(),
            task_provider.clone(),
            icons.clone(),
        );
        let pinned = Arc::new(PinnedTasksProvider::new(
            store.clone(),
            root_projects.clone(),
            task_provider.clone(),
            icons,
        ));

        Self {
            folders,
            client,
            state,
            store,
            root_projects,
            task_provider,
            gradle_tasks,
            pinned,
        }
    }

    /// Every task node of the task tree, in tree order.
    #[must_use]
    pub fn catalog_tasks(&self) -> Vec<TaskNode> {
        let mut tasks = Vec::new();
        let mut pending = self.gradle_tasks.get_children(None);
        pending.reverse();
        while let Some(node) = pending.pop() {
            match node {
                ViewNode::Task(task) => tasks.push(task),
                other => {
                    let mut children = self.gradle_tasks.get_children(Some(&other));
                    children.reverse();
                    pending.extend(children);
                }
            }
        }
        tasks
    }

    /// The first task of the task tree.
    ///
    /// # Panics
    ///
    /// Panics if no task was discovered.
    #[must_use]
    pub fn first_catalog_task(&self) -> TaskNode {
        self.catalog_tasks()
            .into_iter()
            .next()
            .expect("No gradle tasks found")
    }
}
