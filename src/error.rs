//! Custom error types for gradle-pins.
//!
//! Most "failures" in the pinned tasks view are not errors at all: a pin
//! that no longer resolves is dropped, a dismissed prompt aborts the
//! command. The variants here cover what is left: configuration, the
//! persisted state, and the build backend.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for gradle-pins operations
#[derive(Error, Debug)]
pub enum PinError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Failed to load configuration
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {reason}")]
    InvalidConfig { field: String, reason: String },

    // =========================================================================
    // Storage Errors
    // =========================================================================
    /// Reading or writing persisted state failed
    #[error("Storage error for key '{key}': {message}")]
    Storage { key: String, message: String },

    // =========================================================================
    // Build Backend Errors
    // =========================================================================
    /// The build backend could not describe a root project
    #[error("Build backend error for {root}: {message}")]
    Backend { root: PathBuf, message: String },

    // =========================================================================
    // Lookup Errors
    // =========================================================================
    /// No discovered task matches the given id or script
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// A script name matches tasks in more than one project
    #[error("Task '{script}' is ambiguous, use one of: {}", candidates.join(", "))]
    AmbiguousTask {
        script: String,
        candidates: Vec<String>,
    },

    // =========================================================================
    // Internal Errors
    // =========================================================================
    /// Internal invariant broken (poisoned lock and similar)
    #[error("Internal error: {0}")]
    Internal(String),

    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    /// IO error wrapper
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON error wrapper
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PinError {
    // =========================================================================
    // Constructor helpers
    // =========================================================================

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    /// Create a configuration error with path
    pub fn config_with_path(message: impl Into<String>, path: PathBuf) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path),
        }
    }

    /// Create a storage error
    pub fn storage(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a backend error
    pub fn backend(root: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Backend {
            root: root.into(),
            message: message.into(),
        }
    }

    /// Create an error for a poisoned lock
    pub fn poisoned(what: &str) -> Self {
        Self::Internal(format!("Lock poisoned: {}", what))
    }

    // =========================================================================
    // Classification helpers
    // =========================================================================

    /// Get error code for exit status
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::TaskNotFound(_) | Self::AmbiguousTask { .. } => 2,
            Self::Storage { .. } => 3,
            Self::Backend { .. } => 4,
            Self::Config { .. } | Self::InvalidConfig { .. } => 7,
            _ => 1,
        }
    }
}

/// Type alias for gradle-pins results
pub type Result<T> = std::result::Result<T, PinError>;

/// Extension trait for converting foreign errors to PinError
pub trait IntoPinError<T> {
    fn into_pin_storage(self, key: &str) -> Result<T>;
    fn into_pin_backend(self, root: &std::path::Path) -> Result<T>;
}

impl<T, E: Into<anyhow::Error>> IntoPinError<T> for std::result::Result<T, E> {
    fn into_pin_storage(self, key: &str) -> Result<T> {
        self.map_err(|e| PinError::storage(key, format!("{:#}", e.into())))
    }

    fn into_pin_backend(self, root: &std::path::Path) -> Result<T> {
        self.map_err(|e| PinError::backend(root, format!("{:#}", e.into())))
    }
}
