//! gradle-pins - pinned Gradle tasks
//!
//! Keeps a persisted list of favourite build tasks, optionally with
//! arguments, and projects it onto whatever tasks the last discovery found.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`pins`] - The pinned task list and its persistence
//! - [`tasks`] - Task definitions, discovery and the task catalog
//! - [`views`] - The task tree and the pinned tasks tree
//! - [`commands`] - Pin, pin with args, remove and clear-all commands
//! - [`workspace`] - Workspace folders and their root projects
//! - [`config`] - Configuration loading and validation
//! - [`error`] - Custom error types and handling
//! - [`host`] - Traits for the build backend, state storage and dialogs
//! - [`testing`] - Test doubles and assertions
//!
//! # Example
//!
//! ```rust,ignore
//! use gradle_pins::pins::{JsonFileStateStore, PinnedTasksStore};
//! use gradle_pins::tasks::{FileBuildClient, GradleTaskProvider};
//! use gradle_pins::views::{Icons, PinnedTasksProvider};
//!
//! let task_provider = Arc::new(GradleTaskProvider::new(Arc::new(FileBuildClient::default())));
//! task_provider.load_tasks(&root_projects).await?;
//!
//! let state = Arc::new(JsonFileStateStore::open(".gradle-pins/state.json")?);
//! let store = Arc::new(PinnedTasksStore::load(state, "pinnedTasks")?);
//! let pinned = PinnedTasksProvider::new(store, root_projects, task_provider, Icons::default());
//! for node in pinned.get_children(None) {
//!     println!("{}", node.label());
//! }
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod host;
pub mod pins;
pub mod tasks;
pub mod testing;
pub mod views;
pub mod workspace;

// Re-export commonly used types
pub use error::{IntoPinError, PinError, Result};

pub use config::ExtensionConfig;

pub use commands::{
    ClearAllPinnedTasksCommand, Command, PinTaskCommand, PinTaskWithArgsCommand,
    RemovePinnedTaskCommand,
};

pub use pins::{JsonFileStateStore, PinnedTaskEntry, PinnedTasksStore};

pub use tasks::{FileBuildClient, GradleTaskProvider, TaskCatalog, TaskDefinition, TaskId};

pub use views::{GradleTasksProvider, PinnedTasksProvider, TreeItem, ViewNode};

pub use workspace::{RootProject, RootProjectsStore, WorkspaceFolder};

pub use host::{BuildClient, ConfirmDialog, InputPrompt, StateStore};
