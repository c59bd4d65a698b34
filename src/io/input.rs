//! Input channels for the issue workflow, and the interactive terminal.
//!
//! Two distinct channels with a one-directional handoff: the piped source
//! (stdin or the clipboard) is drained completely before the interactive
//! terminal is used for confirmation. Prompts read from the terminal
//! attached to stderr, so a drained pipe on stdin never turns a keypress
//! into EOF.

use std::io::{IsTerminal, Read};
use std::process::Command;
use std::time::Duration;

use console::Term;
use tracing::warn;

use crate::error::{Error, Result};
use crate::io::process::run_command_with_timeout;

const CLIPBOARD_TIMEOUT: Duration = Duration::from_secs(10);
const CLIPBOARD_LIMIT_BYTES: usize = 1_000_000;

const USAGE: &str = "no input provided\nUsage:\n  cat notes.md | ghgen issue    (pipe)\n  ghgen issue -c                (clipboard)";

/// Where the issue workflow sources its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueInput {
    Piped,
    Clipboard,
}

/// Read the issue workflow's content from the chosen channel.
///
/// Blank content is a collection error; so is running the piped variant
/// with an interactive stdin (nothing to drain).
pub fn read_issue_input(source: IssueInput) -> Result<String> {
    let content = match source {
        IssueInput::Clipboard => {
            println!("📋 Reading from clipboard...");
            read_clipboard_text()?
        }
        IssueInput::Piped => read_piped_stdin()?,
    };
    normalized(&content)
}

/// Terminal channel for confirmation prompts.
///
/// Must be used only after any piped input is fully drained. When no
/// controlling terminal is available this is recoverable: prompts resolve
/// to "declined" instead of failing.
pub fn interactive_term() -> Term {
    let term = Term::stderr();
    if !term.is_term() {
        warn!("no controlling terminal available; confirmation prompts will be declined");
    }
    term
}

fn normalized(content: &str) -> Result<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(Error::ContextCollection("input is empty".to_string()));
    }
    Ok(trimmed.to_string())
}

fn read_piped_stdin() -> Result<String> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(Error::ContextCollection(USAGE.to_string()));
    }
    let mut buf = String::new();
    stdin
        .lock()
        .read_to_string(&mut buf)
        .map_err(|e| Error::ContextCollection(format!("read piped input: {e}")))?;
    Ok(buf)
}

fn read_clipboard_text() -> Result<String> {
    if cfg!(target_os = "macos") {
        return read_with_command("pbpaste", &[]);
    }
    if cfg!(target_os = "windows") {
        return read_with_command(
            "powershell",
            &["-NoProfile", "-Command", "Get-Clipboard -Raw"],
        );
    }
    if std::env::var("WAYLAND_DISPLAY").is_ok()
        && let Ok(text) = read_with_command("wl-paste", &["-n"])
    {
        return Ok(text);
    }
    read_with_command("xclip", &["-selection", "clipboard", "-o"])
}

fn read_with_command(program: &str, args: &[&str]) -> Result<String> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    let out = run_command_with_timeout(cmd, None, CLIPBOARD_TIMEOUT, CLIPBOARD_LIMIT_BYTES)
        .map_err(|e| Error::ContextCollection(format!("read clipboard via {program}: {e}")))?;
    if !out.status.success() {
        return Err(Error::ContextCollection(format!(
            "read clipboard via {program}: {}",
            out.stderr_text().trim()
        )));
    }
    Ok(out.stdout_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_trims_surrounding_whitespace() {
        assert_eq!(normalized("  notes\n").expect("content"), "notes");
    }

    #[test]
    fn blank_content_is_a_collection_error() {
        for blank in ["", "   ", "\n\t\n"] {
            let err = normalized(blank).unwrap_err();
            assert!(matches!(err, Error::ContextCollection(_)));
        }
    }
}
