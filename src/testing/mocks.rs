//! Mock implementations of the host collaborator traits.
//!
//! These mocks provide controllable test doubles, enabling deterministic
//! tests of the views and commands.

use crate::host::{BuildClient, ConfirmDialog, InputPrompt, StateStore};
use crate::tasks::GradleBuild;
use crate::workspace::RootProject;
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// Mock build backend.
///
/// Returns the same build for every root unless a per-root build or error
/// was configured (keyed by workspace folder name).
///
/// # Example
///
/// ```rust,ignore
/// let client = MockBuildClient::new()
///     .with_build(build)
///     .with_error_for("folder2", "connection refused");
/// ```
#[derive(Debug, Default)]
pub struct MockBuildClient {
    build: GradleBuild,
    builds_by_root: HashMap<String, GradleBuild>,
    errors_by_root: HashMap<String, String>,
    call_count: AtomicU32,
}

impl MockBuildClient {
    /// Create a mock that returns an empty build.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the build returned for every root.
    #[must_use]
    pub fn with_build(mut self, build: GradleBuild) -> Self {
        self.build = build;
        self
    }

    /// Set the build returned for one root.
    #[must_use]
    pub fn with_build_for(mut self, root_name: &str, build: GradleBuild) -> Self {
        self.builds_by_root.insert(root_name.to_string(), build);
        self
    }

    /// Make describing one root fail.
    #[must_use]
    pub fn with_error_for(mut self, root_name: &str, error: &str) -> Self {
        self.errors_by_root
            .insert(root_name.to_string(), error.to_string());
        self
    }

    /// Number of `get_build` calls made.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BuildClient for MockBuildClient {
    async fn get_build(&self, root_project: &RootProject) -> Result<GradleBuild> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let name = root_project.display_name();
        if let Some(error) = self.errors_by_root.get(name) {
            bail!("{}", error);
        }
        Ok(self
            .builds_by_root
            .get(name)
            .unwrap_or(&self.build)
            .clone())
    }
}

/// In-memory state store.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    values: Mutex<HashMap<String, serde_json::Value>>,
    write_error: Option<String>,
}

impl MemoryStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, as if stored by an earlier session.
    #[must_use]
    pub fn with_value(self, key: &str, value: serde_json::Value) -> Self {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value);
        }
        self
    }

    /// Make every write fail with the given message.
    #[must_use]
    pub fn with_write_error(mut self, error: &str) -> Self {
        self.write_error = Some(error.to_string());
        self
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        let values = self
            .values
            .lock()
            .map_err(|_| anyhow::anyhow!("State lock poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: serde_json::Value) -> Result<()> {
        if let Some(error) = &self.write_error {
            bail!("{}", error);
        }
        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow::anyhow!("State lock poisoned"))?;
        values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Mock input prompt returning a canned answer.
///
/// # Example
///
/// ```rust,ignore
/// let prompt = MockInputPrompt::new().with_response("--info ");
/// assert_eq!(prompt.show_input_box("args").await.as_deref(), Some("--info "));
/// ```
#[derive(Debug, Default)]
pub struct MockInputPrompt {
    response: Option<String>,
    placeholders: Mutex<Vec<String>>,
}

impl MockInputPrompt {
    /// A prompt that is dismissed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every prompt with `response`.
    #[must_use]
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = Some(response.to_string());
        self
    }

    /// Placeholders of every prompt shown so far.
    pub fn placeholders(&self) -> Vec<String> {
        self.placeholders
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl InputPrompt for MockInputPrompt {
    async fn show_input_box(&self, placeholder: &str) -> Option<String> {
        if let Ok(mut shown) = self.placeholders.lock() {
            shown.push(placeholder.to_string());
        }
        self.response.clone()
    }
}

/// Mock confirmation dialog that records what it was asked.
#[derive(Debug, Default)]
pub struct MockConfirmDialog {
    answer: Option<String>,
    messages: Mutex<Vec<String>>,
}

impl MockConfirmDialog {
    /// A dialog that is dismissed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose the button labelled `answer`.
    #[must_use]
    pub fn with_answer(mut self, answer: &str) -> Self {
        self.answer = Some(answer.to_string());
        self
    }

    /// Messages of every dialog shown so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// Whether a dialog with exactly `message` was shown.
    pub fn called_with(&self, message: &str) -> bool {
        self.messages().iter().any(|m| m == message)
    }
}

#[async_trait]
impl ConfirmDialog for MockConfirmDialog {
    async fn show_warning_message(&self, message: &str, _buttons: &[&str]) -> Option<String> {
        if let Ok(mut shown) = self.messages.lock() {
            shown.push(message.to_string());
        }
        self.answer.clone()
    }
}
