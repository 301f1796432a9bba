//! Context tags, icons and fixed labels used by the tree views.

pub const TREE_ITEM_STATE_TASK_IDLE: &str = "task-idle";
pub const TREE_ITEM_STATE_TASK_RUNNING: &str = "task-running";
pub const TREE_ITEM_STATE_NO_TASKS: &str = "no-tasks";
pub const TREE_ITEM_STATE_FOLDER: &str = "folder";
pub const TREE_ITEM_STATE_PROJECT: &str = "project";
pub const TREE_ITEM_STATE_GROUP: &str = "group";

/// Appended to a task context tag when the node carries arguments.
pub const CONTEXT_SUFFIX_WITH_ARGS: &str = "WithArgs";

pub const ICON_WARNING: &str = "warning.svg";
pub const ICON_GRADLE_TASK: &str = "gradle-task.svg";

/// Theme icon shown for root projects.
pub const THEME_ICON_FOLDER: &str = "folder";

pub const NO_PINNED_TASKS_LABEL: &str = "No pinned tasks";
