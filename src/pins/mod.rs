//! Pinned tasks store.
//!
//! The store is an ordered list of `(task id, args)` entries kept in memory
//! and flushed to a [`StateStore`] on every write. It is loaded once when the
//! extension activates and handed to the views and commands explicitly.
//!
//! Every mutation bumps a generation counter on a `watch` channel so the
//! host can refresh the pinned tasks view.

pub mod persistence;

pub use persistence::JsonFileStateStore;

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::{IntoPinError, PinError, Result};
use crate::tasks::{normalize_args, TaskId};
use crate::host::StateStore;

/// Storage key used when none is configured.
pub const DEFAULT_PINNED_TASKS_KEY: &str = "pinnedTasks";

/// One pinned task, optionally qualified by an argument string.
///
/// Persisted as `{ "id": string, "args"?: string }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PinnedTaskEntry {
    pub id: TaskId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
}

impl PinnedTaskEntry {
    /// Create an entry, normalizing the arguments.
    #[must_use]
    pub fn new(id: TaskId, args: Option<&str>) -> Self {
        Self {
            id,
            args: normalize_args(args),
        }
    }

    /// Whether this entry carries arguments.
    #[must_use]
    pub fn has_args(&self) -> bool {
        self.args.is_some()
    }

    fn matches(&self, id: &TaskId, args: Option<&str>) -> bool {
        self.id == *id && self.args.as_deref() == args
    }
}

/// Persisted, ordered set of pinned tasks.
pub struct PinnedTasksStore {
    state: Arc<dyn StateStore>,
    key: String,
    entries: RwLock<Vec<PinnedTaskEntry>>,
    changes: watch::Sender<u64>,
}

impl std::fmt::Debug for PinnedTasksStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinnedTasksStore")
            .field("key", &self.key)
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl PinnedTasksStore {
    /// Load the pinned tasks stored under `key`.
    ///
    /// A missing key yields an empty store. A value that cannot be decoded is
    /// logged and replaced by an empty list on the next write.
    ///
    /// # Errors
    ///
    /// Returns an error if the state store itself cannot be read.
    pub fn load(state: Arc<dyn StateStore>, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let raw = state.get(&key).into_pin_storage(&key)?;

        let entries = match raw {
            None => Vec::new(),
            Some(value) => match serde_json::from_value::<Vec<PinnedTaskEntry>>(value) {
                Ok(entries) => entries
                    .into_iter()
                    .map(|e| PinnedTaskEntry::new(e.id, e.args.as_deref()))
                    .collect(),
                Err(e) => {
                    warn!(key = %key, "Stored pinned tasks are unreadable, starting empty: {}", e);
                    Vec::new()
                }
            },
        };
        debug!(key = %key, count = entries.len(), "Loaded pinned tasks");

        let (changes, _) = watch::channel(0);
        Ok(Self {
            state,
            key,
            entries: RwLock::new(entries),
            changes,
        })
    }

    /// Append a pinned task.
    ///
    /// Duplicates are kept: pinning the same `(id, args)` twice stores two
    /// entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated list cannot be persisted.
    pub fn add(&self, id: TaskId, args: Option<&str>) -> Result<()> {
        let entry = PinnedTaskEntry::new(id, args);
        debug!(id = %entry.id, args = ?entry.args, "Pinning task");
        self.mutate(|entries| {
            entries.push(entry);
            true
        })
    }

    /// Remove the first entry matching `(id, args)` exactly.
    ///
    /// Other copies of a duplicated entry stay pinned. Removing an entry that
    /// is not pinned does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated list cannot be persisted.
    pub fn remove(&self, id: &TaskId, args: Option<&str>) -> Result<()> {
        let args = normalize_args(args);
        self.mutate(|entries| {
            match entries.iter().position(|e| e.matches(id, args.as_deref())) {
                Some(index) => {
                    entries.remove(index);
                    true
                }
                None => false,
            }
        })
    }

    /// Remove every pinned task.
    ///
    /// # Errors
    ///
    /// Returns an error if the empty list cannot be persisted.
    pub fn clear_all(&self) -> Result<()> {
        self.mutate(|entries| {
            entries.clear();
            true
        })
    }

    /// All entries in insertion order.
    #[must_use]
    pub fn get_all(&self) -> Vec<PinnedTaskEntry> {
        match self.entries.read() {
            Ok(entries) => entries.clone(),
            Err(_) => {
                warn!("Pinned tasks lock poisoned, treating store as empty");
                Vec::new()
            }
        }
    }

    /// Whether `(id, args)` is pinned.
    #[must_use]
    pub fn contains(&self, id: &TaskId, args: Option<&str>) -> bool {
        let args = normalize_args(args);
        self.get_all().iter().any(|e| e.matches(id, args.as_deref()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Subscribe to change notifications.
    ///
    /// The value is a generation counter; only the fact that it changed
    /// matters.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    /// Emit a change notification without mutating anything.
    pub fn notify(&self) {
        self.changes.send_modify(|generation| *generation += 1);
    }

    /// Apply `f` to a copy of the entries and keep the copy only once it is
    /// persisted. A failed write leaves the store unchanged.
    fn mutate(&self, f: impl FnOnce(&mut Vec<PinnedTaskEntry>) -> bool) -> Result<()> {
        {
            let mut entries = self
                .entries
                .write()
                .map_err(|_| PinError::poisoned("pinned tasks"))?;
            let mut next = entries.clone();
            if !f(&mut next) {
                return Ok(());
            }

            let value = serde_json::to_value(&next)?;
            self.state.set(&self.key, value).into_pin_storage(&self.key)?;
            *entries = next;
        }

        self.notify();
        Ok(())
    }
}
