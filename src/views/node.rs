//! View nodes shared by the task and pinned task trees.
//!
//! Every node kind carries a [`TreeItemData`] computed when the tree is
//! projected, so rendering never goes back to the catalog or the store.

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::constants::{
    CONTEXT_SUFFIX_WITH_ARGS, ICON_GRADLE_TASK, ICON_WARNING, NO_PINNED_TASKS_LABEL,
    TREE_ITEM_STATE_FOLDER, TREE_ITEM_STATE_GROUP, TREE_ITEM_STATE_NO_TASKS,
    TREE_ITEM_STATE_PROJECT, TREE_ITEM_STATE_TASK_IDLE, TREE_ITEM_STATE_TASK_RUNNING,
};
use super::icons::{Icon, Icons};
use crate::tasks::TaskDefinition;
use crate::workspace::RootProject;

/// Whether a node can be expanded, and if so its initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CollapsibleState {
    None,
    Collapsed,
    Expanded,
}

/// Presentation of a node as the host renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeItemData {
    pub label: String,
    pub description: String,
    pub tooltip: Option<String>,
    pub collapsible_state: CollapsibleState,
    pub context_value: String,
    pub icon: Option<Icon>,
}

/// Rendering contract shared by every node kind.
pub trait TreeItem {
    fn item(&self) -> &TreeItemData;

    fn label(&self) -> &str {
        &self.item().label
    }

    fn description(&self) -> &str {
        &self.item().description
    }

    fn tooltip(&self) -> Option<&str> {
        self.item().tooltip.as_deref()
    }

    fn collapsible_state(&self) -> CollapsibleState {
        self.item().collapsible_state
    }

    fn context_value(&self) -> &str {
        &self.item().context_value
    }

    fn icon(&self) -> Option<&Icon> {
        self.item().icon.as_ref()
    }
}

fn task_context(running: bool, has_args: bool) -> String {
    let base = if running {
        TREE_ITEM_STATE_TASK_RUNNING
    } else {
        TREE_ITEM_STATE_TASK_IDLE
    };
    if has_args {
        format!("{}{}", base, CONTEXT_SUFFIX_WITH_ARGS)
    } else {
        base.to_string()
    }
}

/// Placeholder shown when nothing is pinned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoPinnedTasksNode {
    pub item: TreeItemData,
}

impl NoPinnedTasksNode {
    #[must_use]
    pub fn new(icons: &Icons) -> Self {
        Self {
            item: TreeItemData {
                label: NO_PINNED_TASKS_LABEL.to_string(),
                description: String::new(),
                tooltip: None,
                collapsible_state: CollapsibleState::None,
                context_value: TREE_ITEM_STATE_NO_TASKS.to_string(),
                icon: Some(icons.icon(ICON_WARNING)),
            },
        }
    }
}

/// A pinned task, possibly qualified by arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedTaskNode {
    pub item: TreeItemData,
    pub definition: TaskDefinition,
    pub args: Option<String>,
    /// Key of the root project this task is grouped under.
    #[serde(skip)]
    pub(crate) parent: Option<PathBuf>,
}

impl PinnedTaskNode {
    /// Build the node for a resolved pin. `args` must already be normalized.
    #[must_use]
    pub fn new(
        definition: TaskDefinition,
        args: Option<String>,
        parent: Option<PathBuf>,
        running: bool,
        icons: &Icons,
    ) -> Self {
        let (label, tooltip) = match &args {
            Some(args) => (
                format!("{} {}", definition.script, args),
                format!("(args: {}) {}", args, definition.description),
            ),
            None => (definition.script.clone(), definition.description.clone()),
        };
        let item = TreeItemData {
            label,
            description: String::new(),
            tooltip: Some(tooltip),
            collapsible_state: CollapsibleState::None,
            context_value: task_context(running, args.is_some()),
            icon: Some(icons.icon(ICON_GRADLE_TASK)),
        };
        Self {
            item,
            definition,
            args,
            parent,
        }
    }

    /// Key of the parent root project node.
    #[must_use]
    pub fn parent_key(&self) -> Option<&Path> {
        self.parent.as_deref()
    }
}

/// Pinned tasks of one root project (multi-root workspaces).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedRootProjectNode {
    pub item: TreeItemData,
    pub root_project: RootProject,
    pub tasks: Vec<PinnedTaskNode>,
}

impl PinnedRootProjectNode {
    #[must_use]
    pub fn new(root_project: RootProject) -> Self {
        let item = TreeItemData {
            label: root_project.display_name().to_string(),
            description: String::new(),
            tooltip: Some(root_project.project_path().display().to_string()),
            collapsible_state: CollapsibleState::Expanded,
            context_value: TREE_ITEM_STATE_FOLDER.to_string(),
            icon: Some(Icon::folder()),
        };
        Self {
            item,
            root_project,
            tasks: Vec::new(),
        }
    }

    /// Root project nodes are always top level.
    #[must_use]
    pub fn parent_key(&self) -> Option<&Path> {
        None
    }
}

/// A discovered task in the task tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskNode {
    pub item: TreeItemData,
    pub definition: TaskDefinition,
}

impl TaskNode {
    #[must_use]
    pub fn new(definition: TaskDefinition, running: bool, icons: &Icons) -> Self {
        let label = definition
            .script
            .rsplit(':')
            .next()
            .unwrap_or(&definition.script)
            .to_string();
        let item = TreeItemData {
            label,
            description: String::new(),
            tooltip: Some(definition.description.clone()).filter(|d| !d.is_empty()),
            collapsible_state: CollapsibleState::None,
            context_value: task_context(running, definition.args.is_some()),
            icon: Some(icons.icon(ICON_GRADLE_TASK)),
        };
        Self { item, definition }
    }
}

/// A task group inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupNode {
    pub item: TreeItemData,
    pub name: String,
    pub tasks: Vec<TaskNode>,
}

impl GroupNode {
    #[must_use]
    pub fn new(name: &str, tasks: Vec<TaskNode>) -> Self {
        let item = TreeItemData {
            label: name.to_string(),
            description: String::new(),
            tooltip: None,
            collapsible_state: CollapsibleState::Collapsed,
            context_value: TREE_ITEM_STATE_GROUP.to_string(),
            icon: None,
        };
        Self {
            item,
            name: name.to_string(),
            tasks,
        }
    }
}

/// A project of a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectNode {
    pub item: TreeItemData,
    pub name: String,
    pub project_folder: PathBuf,
    pub groups: Vec<GroupNode>,
}

impl ProjectNode {
    #[must_use]
    pub fn new(name: &str, project_folder: &Path, groups: Vec<GroupNode>) -> Self {
        let item = TreeItemData {
            label: name.to_string(),
            description: String::new(),
            tooltip: Some(project_folder.display().to_string()),
            collapsible_state: CollapsibleState::Collapsed,
            context_value: TREE_ITEM_STATE_PROJECT.to_string(),
            icon: None,
        };
        Self {
            item,
            name: name.to_string(),
            project_folder: project_folder.to_path_buf(),
            groups,
        }
    }
}

/// A root project in the task tree (multi-root workspaces).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootProjectNode {
    pub item: TreeItemData,
    pub root_project: RootProject,
    pub projects: Vec<ProjectNode>,
}

impl RootProjectNode {
    #[must_use]
    pub fn new(root_project: RootProject, projects: Vec<ProjectNode>) -> Self {
        let item = TreeItemData {
            label: root_project.display_name().to_string(),
            description: String::new(),
            tooltip: Some(root_project.project_path().display().to_string()),
            collapsible_state: CollapsibleState::Expanded,
            context_value: TREE_ITEM_STATE_FOLDER.to_string(),
            icon: Some(Icon::folder()),
        };
        Self {
            item,
            root_project,
            projects,
        }
    }
}

/// Any node of either tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ViewNode {
    NoPinnedTasks(NoPinnedTasksNode),
    PinnedTask(PinnedTaskNode),
    PinnedRootProject(PinnedRootProjectNode),
    RootProject(RootProjectNode),
    Project(ProjectNode),
    Group(GroupNode),
    Task(TaskNode),
}

impl ViewNode {
    /// The task behind a task or pinned task node.
    #[must_use]
    pub fn task_definition(&self) -> Option<&TaskDefinition> {
        match self {
            ViewNode::PinnedTask(n) => Some(&n.definition),
            ViewNode::Task(n) => Some(&n.definition),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_pinned_task(&self) -> Option<&PinnedTaskNode> {
        match self {
            ViewNode::PinnedTask(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_pinned_root_project(&self) -> Option<&PinnedRootProjectNode> {
        match self {
            ViewNode::PinnedRootProject(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_root_project(&self) -> Option<&RootProjectNode> {
        match self {
            ViewNode::RootProject(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_project(&self) -> Option<&ProjectNode> {
        match self {
            ViewNode::Project(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_group(&self) -> Option<&GroupNode> {
        match self {
            ViewNode::Group(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_task(&self) -> Option<&TaskNode> {
        match self {
            ViewNode::Task(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_no_pinned_tasks(&self) -> bool {
        matches!(self, ViewNode::NoPinnedTasks(_))
    }

    /// Children owned by this node, in display order.
    #[must_use]
    pub fn children(&self) -> Vec<ViewNode> {
        match self {
            ViewNode::PinnedRootProject(n) => {
                n.tasks.iter().cloned().map(ViewNode::PinnedTask).collect()
            }
            ViewNode::RootProject(n) => n.projects.iter().cloned().map(ViewNode::Project).collect(),
            ViewNode::Project(n) => n.groups.iter().cloned().map(ViewNode::Group).collect(),
            ViewNode::Group(n) => n.tasks.iter().cloned().map(ViewNode::Task).collect(),
            ViewNode::NoPinnedTasks(_) | ViewNode::PinnedTask(_) | ViewNode::Task(_) => Vec::new(),
        }
    }
}

impl TreeItem for ViewNode {
    fn item(&self) -> &TreeItemData {
        match self {
            ViewNode::NoPinnedTasks(n) => &n.item,
            ViewNode::PinnedTask(n) => &n.item,
            ViewNode::PinnedRootProject(n) => &n.item,
            ViewNode::RootProject(n) => &n.item,
            ViewNode::Project(n) => &n.item,
            ViewNode::Group(n) => &n.item,
            ViewNode::Task(n) => &n.item,
        }
    }
}

macro_rules! impl_tree_item {
    ($($node:ty),* $(,)?) => {
        $(
            impl TreeItem for $node {
                fn item(&self) -> &TreeItemData {
                    &self.item
                }
            }
        )*
    };
}

impl_tree_item!(
    NoPinnedTasksNode,
    PinnedTaskNode,
    PinnedRootProjectNode,
    RootProjectNode,
    ProjectNode,
    GroupNode,
    TaskNode,
);
