//! Terminal implementations of the prompt and confirmation dialog.

use async_trait::async_trait;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use gradle_pins::host::{ConfirmDialog, InputPrompt};

/// Read one line from stdin after printing `prompt`.
///
/// Returns `None` on end of input or a read error.
async fn read_line(prompt: &str) -> Option<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(prompt.as_bytes()).await.ok()?;
    stdout.flush().await.ok()?;

    let mut line = String::new();
    let read = BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .ok()?;
    if read == 0 {
        return None;
    }
    Some(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Asks for arguments on stdin.
pub struct TerminalPrompt;

#[async_trait]
impl InputPrompt for TerminalPrompt {
    async fn show_input_box(&self, placeholder: &str) -> Option<String> {
        read_line(&format!("Task arguments ({}): ", placeholder.dimmed())).await
    }
}

/// Answers every prompt with arguments given on the command line.
pub struct PresetPrompt(pub String);

#[async_trait]
impl InputPrompt for PresetPrompt {
    async fn show_input_box(&self, _placeholder: &str) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Asks for confirmation on stdin.
///
/// The answer is matched case-insensitively against the button labels.
pub struct TerminalConfirm;

#[async_trait]
impl ConfirmDialog for TerminalConfirm {
    async fn show_warning_message(&self, message: &str, buttons: &[&str]) -> Option<String> {
        let prompt = format!(
            "{} {} [{}] ",
            "Warning:".yellow().bold(),
            message,
            buttons.join("/")
        );
        let answer = read_line(&prompt).await?;
        let answer = answer.trim();
        buttons
            .iter()
            .find(|b| b.eq_ignore_ascii_case(answer))
            .map(|b| (*b).to_string())
    }
}

/// Picks the first button without asking (`--yes`).
pub struct AutoConfirm;

#[async_trait]
impl ConfirmDialog for AutoConfirm {
    async fn show_warning_message(&self, _message: &str, buttons: &[&str]) -> Option<String> {
        buttons.first().map(|b| (*b).to_string())
    }
}
