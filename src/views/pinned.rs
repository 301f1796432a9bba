//! Pinned tasks tree.
//!
//! The tree is recomputed from the pin store and the task catalog on every
//! read; there is no incremental patching. Pins whose task is gone from the
//! catalog are left in the store but not shown.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use super::icons::Icons;
use super::node::{NoPinnedTasksNode, PinnedRootProjectNode, PinnedTaskNode, ViewNode};
use crate::error::Result;
use crate::pins::PinnedTasksStore;
use crate::tasks::{GradleTaskProvider, TaskDefinition};
use crate::workspace::RootProjectsStore;

/// One projection of the pinned tasks.
///
/// Tasks are always grouped by root project internally; single-root
/// workspaces flatten the groups when listing the top level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedTasksTree {
    groups: Vec<PinnedRootProjectNode>,
    multi_root: bool,
    empty: NoPinnedTasksNode,
}

impl PinnedTasksTree {
    /// Top-level nodes as the host shows them.
    #[must_use]
    pub fn top_level(&self) -> Vec<ViewNode> {
        if self.groups.is_empty() {
            return vec![ViewNode::NoPinnedTasks(self.empty.clone())];
        }
        if self.multi_root {
            self.groups
                .iter()
                .cloned()
                .map(ViewNode::PinnedRootProject)
                .collect()
        } else {
            self.tasks().cloned().map(ViewNode::PinnedTask).collect()
        }
    }

    /// Every pinned task node in display order.
    pub fn tasks(&self) -> impl Iterator<Item = &PinnedTaskNode> {
        self.groups.iter().flat_map(|g| g.tasks.iter())
    }

    /// The root project node a pinned task belongs to.
    #[must_use]
    pub fn parent_of(&self, node: &PinnedTaskNode) -> Option<&PinnedRootProjectNode> {
        let key = node.parent_key()?;
        self.root_project(key)
    }

    /// The pinned root project node for `key`.
    #[must_use]
    pub fn root_project(&self, key: &Path) -> Option<&PinnedRootProjectNode> {
        self.groups.iter().find(|g| g.root_project.key() == key)
    }

    /// Number of resolved pinned tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Data provider of the pinned tasks tree.
#[derive(Debug)]
pub struct PinnedTasksProvider {
    store: Arc<PinnedTasksStore>,
    root_projects: Arc<RootProjectsStore>,
    task_provider: Arc<GradleTaskProvider>,
    icons: Icons,
}

impl PinnedTasksProvider {
    #[must_use]
    pub fn new(
        store: Arc<PinnedTasksStore>,
        root_projects: Arc<RootProjectsStore>,
        task_provider: Arc<GradleTaskProvider>,
        icons: Icons,
    ) -> Self {
        Self {
            store,
            root_projects,
            task_provider,
            icons,
        }
    }

    /// The pin store behind this view.
    #[must_use]
    pub fn store(&self) -> &Arc<PinnedTasksStore> {
        &self.store
    }

    /// Children of `node`, or the top level when `node` is `None`.
    ///
    /// Only pinned root project nodes have children.
    #[must_use]
    pub fn get_children(&self, node: Option<&ViewNode>) -> Vec<ViewNode> {
        match node {
            None => self.project().top_level(),
            Some(ViewNode::PinnedRootProject(root)) => root
                .tasks
                .iter()
                .cloned()
                .map(ViewNode::PinnedTask)
                .collect(),
            Some(_) => Vec::new(),
        }
    }

    /// Project the pin store onto the current catalog.
    #[must_use]
    pub fn project(&self) -> PinnedTasksTree {
        let catalog = self.task_provider.catalog();
        let mut groups: Vec<PinnedRootProjectNode> = Vec::new();

        for entry in self.store.get_all() {
            let Some(definition) = catalog.resolve(&entry.id) else {
                debug!(id = %entry.id, "Pinned task no longer exists, hiding it");
                continue;
            };

            let root_key = definition.workspace_folder.clone();
            let group_index = match groups
                .iter()
                .position(|g| g.root_project.key() == root_key.as_path())
            {
                Some(index) => index,
                None => {
                    let root_project = catalog
                        .root_project(&root_key)
                        .map(|r| r.root_project.clone());
                    let Some(root_project) = root_project else {
                        debug!(id = %entry.id, "Pinned task has no root project, hiding it");
                        continue;
                    };
                    groups.push(PinnedRootProjectNode::new(root_project));
                    groups.len() - 1
                }
            };

            let running = self.task_provider.is_running(&definition.id);
            groups[group_index].tasks.push(PinnedTaskNode::new(
                definition.clone(),
                entry.args,
                Some(root_key),
                running,
                &self.icons,
            ));
        }

        PinnedTasksTree {
            groups,
            multi_root: self.root_projects.is_multi_root(),
            empty: NoPinnedTasksNode::new(&self.icons),
        }
    }

    /// Pin a task, optionally with arguments, and refresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the pin cannot be persisted.
    pub fn pin_task(&self, definition: &TaskDefinition, args: Option<&str>) -> Result<()> {
        self.store.add(definition.id.clone(), args)?;
        self.refresh();
        Ok(())
    }

    /// Unpin the exact `(task, args)` entry and refresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    pub fn unpin_task(&self, definition: &TaskDefinition, args: Option<&str>) -> Result<()> {
        self.store.remove(&definition.id, args)?;
        self.refresh();
        Ok(())
    }

    /// Ask the host to re-read the tree.
    pub fn refresh(&self) {
        self.store.notify();
    }

    /// Tree change notifications for the host.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.store.subscribe()
    }
}
