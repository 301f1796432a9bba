//! Testing infrastructure for gradle-pins.
//!
//! This module provides mocks of the [`crate::host`] traits, fixtures and
//! assertions for testing the views and commands without a host.
//!
//! # Architecture
//!
//! - **Mocks**: Test doubles that implement the host traits with controllable behavior
//! - **Fixtures**: A pre-wired two-folder workspace (test-only)
//! - **Assertions**: Custom assertions for tree view nodes
//!
//! # Example
//!
//! ```rust,ignore
//! use gradle_pins::testing::{MockConfirmDialog, MockInputPrompt};
//!
//! let prompt = MockInputPrompt::new().with_response("--info");
//! let dialog = MockConfirmDialog::new().with_answer("Yes");
//! ```

pub mod assertions;
#[cfg(test)]
pub mod fixtures;
pub mod mocks;

// Re-export commonly used types
pub use assertions::*;
#[cfg(test)]
pub use fixtures::*;
pub use mocks::*;

// The host traits, so tests can call mock methods with one import
pub use crate::host::{BuildClient, ConfirmDialog, InputPrompt, StateStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_input_prompt_default_is_dismissed() {
        let prompt = MockInputPrompt::default();
        assert!(prompt.show_input_box("args").await.is_none());
        assert_eq!(prompt.placeholders(), vec!["args".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_input_prompt_with_response() {
        let prompt = MockInputPrompt::new().with_response("--info ");
        assert_eq!(
            prompt.show_input_box("args").await.as_deref(),
            Some("--info ")
        );
    }

    #[tokio::test]
    async fn test_mock_confirm_dialog_records_messages() {
        let dialog = MockConfirmDialog::new().with_answer("Yes");
        let answer = dialog.show_warning_message("Sure?", &["Yes", "No"]).await;
        assert_eq!(answer.as_deref(), Some("Yes"));
        assert!(dialog.called_with("Sure?"));
        assert!(!dialog.called_with("Other"));
    }

    #[tokio::test]
    async fn test_mock_build_client_per_root_error() {
        let client = MockBuildClient::new().with_error_for("folder2", "offline");
        let ok = client
            .get_build(&crate::workspace::RootProject::new(mock_workspace_folder(
                0, "folder1", "folder1",
            )))
            .await;
        let err = client
            .get_build(&crate::workspace::RootProject::new(mock_workspace_folder(
                1, "folder2", "folder2",
            )))
            .await;
        assert!(ok.is_ok());
        assert!(err.unwrap_err().to_string().contains("offline"));
        assert_eq!(client.call_count(), 2);
    }

    #[test]
    fn test_memory_state_store_round_trip() {
        let state = MemoryStateStore::new();
        assert!(state.get("k").unwrap().is_none());
        state.set("k", serde_json::json!([1, 2])).unwrap();
        assert_eq!(state.get("k").unwrap(), Some(serde_json::json!([1, 2])));
    }

    #[test]
    fn test_memory_state_store_write_error() {
        let state = MemoryStateStore::new().with_write_error("read-only");
        assert!(state.set("k", serde_json::json!(1)).is_err());
    }
}
