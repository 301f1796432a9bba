//! User commands acting on the pinned tasks.
//!
//! Every command either completes its store mutation (and refreshes the
//! view) or does nothing. Being invoked on the wrong kind of node, a
//! dismissed prompt and a declined confirmation are all silent no-ops; only
//! persistence failures are reported as errors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::Result;
use crate::pins::PinnedTasksStore;
use crate::host::{ConfirmDialog, InputPrompt};
use crate::views::{PinnedTasksProvider, ViewNode};

pub const COMMAND_PIN_TASK: &str = "gradle.pinTask";
pub const COMMAND_PIN_TASK_WITH_ARGS: &str = "gradle.pinTaskWithArgs";
pub const COMMAND_REMOVE_PINNED_TASK: &str = "gradle.removePinnedTask";
pub const COMMAND_CLEAR_ALL_PINNED_TASKS: &str = "gradle.clearAllPinnedTasks";

/// Placeholder of the argument prompt.
pub const TASK_ARGS_PLACEHOLDER: &str = "For example: --info";

pub const CONFIRM_CLEAR_PINNED_TASKS: &str = "Are you sure you want to clear the pinned tasks?";
pub const CONFIRM_YES: &str = "Yes";
pub const CONFIRM_NO: &str = "No";

/// A command the host can bind to a menu entry.
#[async_trait]
pub trait Command: Send + Sync {
    /// Identifier the host registers the command under.
    fn id(&self) -> &'static str;

    /// Run the command on the node it was invoked on, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting change cannot be persisted.
    async fn run(&self, node: Option<&ViewNode>) -> Result<()>;
}

/// Pin a task without arguments.
#[derive(Debug, Clone)]
pub struct PinTaskCommand {
    provider: Arc<PinnedTasksProvider>,
}

impl PinTaskCommand {
    #[must_use]
    pub fn new(provider: Arc<PinnedTasksProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Command for PinTaskCommand {
    fn id(&self) -> &'static str {
        COMMAND_PIN_TASK
    }

    async fn run(&self, node: Option<&ViewNode>) -> Result<()> {
        let Some(definition) = node.and_then(ViewNode::task_definition) else {
            debug!("Pin requested on a node without a task");
            return Ok(());
        };
        self.provider.pin_task(definition, None)
    }
}

/// Pin a task with arguments collected from the user.
///
/// Always adds a new entry, even if the task is already pinned bare or with
/// other arguments.
pub struct PinTaskWithArgsCommand {
    provider: Arc<PinnedTasksProvider>,
    prompt: Arc<dyn InputPrompt>,
}

impl PinTaskWithArgsCommand {
    #[must_use]
    pub fn new(provider: Arc<PinnedTasksProvider>, prompt: Arc<dyn InputPrompt>) -> Self {
        Self { provider, prompt }
    }
}

#[async_trait]
impl Command for PinTaskWithArgsCommand {
    fn id(&self) -> &'static str {
        COMMAND_PIN_TASK_WITH_ARGS
    }

    async fn run(&self, node: Option<&ViewNode>) -> Result<()> {
        let Some(definition) = node.and_then(ViewNode::task_definition) else {
            debug!("Pin with args requested on a node without a task");
            return Ok(());
        };
        let Some(args) = self.prompt.show_input_box(TASK_ARGS_PLACEHOLDER).await else {
            debug!(id = %definition.id, "Argument prompt dismissed");
            return Ok(());
        };
        self.provider.pin_task(definition, Some(&args))
    }
}

/// Unpin the exact `(task, args)` entry behind a pinned task node.
#[derive(Debug, Clone)]
pub struct RemovePinnedTaskCommand {
    provider: Arc<PinnedTasksProvider>,
}

impl RemovePinnedTaskCommand {
    #[must_use]
    pub fn new(provider: Arc<PinnedTasksProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Command for RemovePinnedTaskCommand {
    fn id(&self) -> &'static str {
        COMMAND_REMOVE_PINNED_TASK
    }

    async fn run(&self, node: Option<&ViewNode>) -> Result<()> {
        let Some(pinned) = node.and_then(ViewNode::as_pinned_task) else {
            debug!("Remove requested on a node that is not a pinned task");
            return Ok(());
        };
        self.provider
            .unpin_task(&pinned.definition, pinned.args.as_deref())
    }
}

/// Clear every pinned task after confirmation.
pub struct ClearAllPinnedTasksCommand {
    store: Arc<PinnedTasksStore>,
    dialog: Arc<dyn ConfirmDialog>,
}

impl ClearAllPinnedTasksCommand {
    #[must_use]
    pub fn new(store: Arc<PinnedTasksStore>, dialog: Arc<dyn ConfirmDialog>) -> Self {
        Self { store, dialog }
    }
}

#[async_trait]
impl Command for ClearAllPinnedTasksCommand {
    fn id(&self) -> &'static str {
        COMMAND_CLEAR_ALL_PINNED_TASKS
    }

    async fn run(&self, _node: Option<&ViewNode>) -> Result<()> {
        let answer = self
            .dialog
            .show_warning_message(CONFIRM_CLEAR_PINNED_TASKS, &[CONFIRM_YES, CONFIRM_NO])
            .await;
        if answer.as_deref() != Some(CONFIRM_YES) {
            debug!(answer = ?answer, "Clear pinned tasks declined");
            return Ok(());
        }
        self.store.clear_all()?;
        info!("Cleared pinned tasks");
        Ok(())
    }
}
