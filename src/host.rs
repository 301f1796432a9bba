//! Host collaborators.
//!
//! The pinned tasks view talks to four things it does not own: the build
//! backend, the persisted key-value store, an input prompt and a
//! confirmation dialog. Each is a trait so the view and the commands can be
//! tested without a host.

use anyhow::Result;
use async_trait::async_trait;

use crate::tasks::GradleBuild;
use crate::workspace::RootProject;

/// Abstraction for the build backend.
///
/// One call describes one root build; it is made once per discovery cycle.
///
/// # Example
///
/// ```rust,ignore
/// use gradle_pins::host::BuildClient;
///
/// async fn count_tasks(client: &impl BuildClient, root: &RootProject) -> Result<usize> {
///     let build = client.get_build(root).await?;
///     Ok(build.project.map(|p| p.tasks.len()).unwrap_or(0))
/// }
/// ```
#[async_trait]
pub trait BuildClient: Send + Sync {
    /// Describe the build of a root project.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or the build is broken.
    async fn get_build(&self, root_project: &RootProject) -> Result<GradleBuild>;
}

/// Abstraction for persisted extension state.
///
/// Values survive host restarts. Writes are expected to be durable when
/// `set` returns.
pub trait StateStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set(&self, key: &str, value: serde_json::Value) -> Result<()>;
}

/// Abstraction for a free-text input prompt.
#[async_trait]
pub trait InputPrompt: Send + Sync {
    /// Ask the user for a value.
    ///
    /// Returns `None` when the prompt is dismissed.
    async fn show_input_box(&self, placeholder: &str) -> Option<String>;
}

/// Abstraction for a modal confirmation dialog.
#[async_trait]
pub trait ConfirmDialog: Send + Sync {
    /// Show a warning with the given buttons.
    ///
    /// Returns the label of the chosen button, or `None` when dismissed.
    async fn show_warning_message(&self, message: &str, buttons: &[&str]) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pins::JsonFileStateStore;
    use crate::tasks::FileBuildClient;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_production_implementations_are_host_objects() {
        let temp = TempDir::new().unwrap();
        let state: Arc<dyn StateStore> =
            Arc::new(JsonFileStateStore::open(temp.path().join("state.json")).unwrap());
        let _client: Arc<dyn BuildClient> = Arc::new(FileBuildClient::default());

        state.set("pins", serde_json::json!([])).unwrap();
        assert_eq!(state.get("pins").unwrap(), Some(serde_json::json!([])));
    }
}
