//! Tree views: the task tree and the pinned tasks tree.
//!
//! Both providers follow the host's tree data provider contract:
//! `get_children(None)` returns the top level, `get_children(Some(node))`
//! the children of a node. Nodes are plain values; the host re-reads the
//! tree after each change notification.

pub mod constants;
pub mod icons;
pub mod node;
pub mod pinned;
pub mod render;
pub mod tasks;

pub use icons::{Icon, IconPath, Icons};
pub use node::{
    CollapsibleState, GroupNode, NoPinnedTasksNode, PinnedRootProjectNode, PinnedTaskNode,
    ProjectNode, RootProjectNode, TaskNode, TreeItem, TreeItemData, ViewNode,
};
pub use pinned::{PinnedTasksProvider, PinnedTasksTree};
pub use render::render_tree;
pub use tasks::GradleTasksProvider;
