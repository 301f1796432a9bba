//! Tree of every discovered task.
//!
//! Single-root workspaces show the projects of the one root at the top
//! level; multi-root workspaces add a root project level above them.

use std::sync::Arc;

use super::icons::Icons;
use super::node::{GroupNode, ProjectNode, RootProjectNode, TaskNode, ViewNode};
use crate::tasks::{CatalogProject, CatalogRootProject, GradleTaskProvider};
use crate::workspace::RootProjectsStore;

/// Data provider of the task tree.
#[derive(Debug)]
pub struct GradleTasksProvider {
    root_projects: Arc<RootProjectsStore>,
    task_provider: Arc<GradleTaskProvider>,
    icons: Icons,
}

impl GradleTasksProvider {
    #[must_use]
    pub fn new(
        root_projects: Arc<RootProjectsStore>,
        task_provider: Arc<GradleTaskProvider>,
        icons: Icons,
    ) -> Self {
        Self {
            root_projects,
            task_provider,
            icons,
        }
    }

    /// Children of `node`, or the top level when `node` is `None`.
    #[must_use]
    pub fn get_children(&self, node: Option<&ViewNode>) -> Vec<ViewNode> {
        match node {
            Some(node) => node.children(),
            None => self.top_level(),
        }
    }

    fn top_level(&self) -> Vec<ViewNode> {
        let catalog = self.task_provider.catalog();
        let roots = catalog.root_projects();

        if self.root_projects.is_multi_root() {
            roots
                .iter()
                .map(|root| ViewNode::RootProject(self.root_project_node(root)))
                .collect()
        } else {
            roots
                .first()
                .map(|root| {
                    root.projects
                        .iter()
                        .map(|p| ViewNode::Project(self.project_node(p)))
                        .collect()
                })
                .unwrap_or_default()
        }
    }

    fn root_project_node(&self, root: &CatalogRootProject) -> RootProjectNode {
        let projects = root.projects.iter().map(|p| self.project_node(p)).collect();
        RootProjectNode::new(root.root_project.clone(), projects)
    }

    fn project_node(&self, project: &CatalogProject) -> ProjectNode {
        let groups = project
            .groups
            .iter()
            .map(|group| {
                let tasks = group
                    .tasks
                    .iter()
                    .map(|def| {
                        let running = self.task_provider.is_running(&def.id);
                        TaskNode::new(def.clone(), running, &self.icons)
                    })
                    .collect();
                GroupNode::new(&group.name, tasks)
            })
            .collect();
        ProjectNode::new(&project.name, &project.project_folder, groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::TestWorkspace;
    use crate::views::constants::{TREE_ITEM_STATE_FOLDER, TREE_ITEM_STATE_TASK_RUNNING};
    use crate::views::node::{CollapsibleState, TreeItem};

    #[tokio::test]
    async fn test_single_root_lists_projects() {
        let ws = TestWorkspace::single_root().await;
        let children = ws.gradle_tasks.get_children(None);

        assert_eq!(children.len(), 1);
        let project = children[0].as_project().expect("expected a project node");
        assert_eq!(project.groups.len(), 1);
        let tasks = &project.groups[0].tasks;
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].label(), "assemble1");
        assert_eq!(tasks[1].label(), "assemble2");
    }

    #[tokio::test]
    async fn test_multi_root_lists_root_projects() {
        let ws = TestWorkspace::multi_root().await;
        let children = ws.gradle_tasks.get_children(None);

        assert_eq!(children.len(), 2);
        let root = children[0].as_root_project().expect("expected a root project");
        assert_eq!(root.label(), "folder1");
        assert_eq!(root.context_value(), TREE_ITEM_STATE_FOLDER);
        assert_eq!(root.collapsible_state(), CollapsibleState::Expanded);

        let projects = ws.gradle_tasks.get_children(Some(&children[0]));
        let groups = ws.gradle_tasks.get_children(Some(&projects[0]));
        let tasks = ws.gradle_tasks.get_children(Some(&groups[0]));
        assert!(tasks[0].as_task().is_some());
        assert!(ws.gradle_tasks.get_children(Some(&tasks[0])).is_empty());
    }

    #[tokio::test]
    async fn test_running_task_context() {
        let ws = TestWorkspace::single_root().await;
        let first = ws.first_catalog_task();
        ws.task_provider.set_running(&first.definition.id, true);

        let children = ws.gradle_tasks.get_children(None);
        let project = children[0].as_project().unwrap();
        assert_eq!(
            project.groups[0].tasks[0].context_value(),
            TREE_ITEM_STATE_TASK_RUNNING
        );
    }

    #[tokio::test]
    async fn test_no_roots_no_children() {
        let ws = TestWorkspace::with_folders(&[]).await;
        assert!(ws.gradle_tasks.get_children(None).is_empty());
    }
}
