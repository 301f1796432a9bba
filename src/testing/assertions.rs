//! Custom assertions for tree view nodes.

use std::path::Path;

use crate::views::constants::{ICON_GRADLE_TASK, TREE_ITEM_STATE_FOLDER};
use crate::views::{CollapsibleState, PinnedRootProjectNode, TreeItem, ViewNode};
use crate::workspace::WorkspaceFolder;

/// Assert that a root project node represents `folder`.
///
/// # Panics
///
/// Panics if the label, context tag or collapsible state is wrong.
pub fn assert_folder_node(node: &PinnedRootProjectNode, folder: &WorkspaceFolder) {
    assert_eq!(
        node.label(),
        folder.name,
        "Expected root project node for folder '{}'",
        folder.name
    );
    assert_eq!(node.context_value(), TREE_ITEM_STATE_FOLDER);
    assert_eq!(node.collapsible_state(), CollapsibleState::Expanded);
    assert_eq!(node.root_project.workspace_folder(), folder);
}

/// Assert that a node uses the gradle task icon in both themes.
///
/// # Panics
///
/// Panics if the icon is missing or points elsewhere.
pub fn assert_gradle_task_icon(node: &impl TreeItem) {
    let icon = node
        .icon()
        .and_then(|i| i.as_path())
        .unwrap_or_else(|| panic!("Expected a resource icon on '{}'", node.label()));
    assert_eq!(
        icon.dark,
        Path::new("resources").join("dark").join(ICON_GRADLE_TASK)
    );
    assert_eq!(
        icon.light,
        Path::new("resources").join("light").join(ICON_GRADLE_TASK)
    );
}

/// Assert that a tree shows only the "No pinned tasks" placeholder.
///
/// # Panics
///
/// Panics if there are pinned task nodes.
pub fn assert_no_pinned_tasks(children: &[ViewNode]) {
    assert_eq!(
        children.len(),
        1,
        "Expected only the placeholder, got {} nodes",
        children.len()
    );
    assert!(
        children[0].is_no_pinned_tasks(),
        "Expected the placeholder node, got '{}'",
        children[0].label()
    );
}
