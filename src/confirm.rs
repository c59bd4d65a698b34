//! Confirmation prompts for the execution engine.
//!
//! Declining, interrupting, and missing-terminal conditions all resolve to
//! "do not execute": cancellation is always a clean exit, never an error.

use console::Term;
use dialoguer::{Confirm, Select, theme::ColorfulTheme};
use tracing::warn;

/// Ask a yes/no question. Anything but an explicit "yes" declines.
pub fn confirm(term: &Term, prompt: &str, default: bool) -> bool {
    if !term.is_term() {
        warn!(prompt, "no controlling terminal available; declining");
        return false;
    }
    match Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .interact_on_opt(term)
    {
        Ok(Some(answer)) => answer,
        Ok(None) => false,
        Err(err) => {
            warn!(err = %err, "confirmation prompt failed");
            false
        }
    }
}

/// The commit workflow's three-way choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitChoice {
    Commit,
    /// Surface the message for manual use, then cancel without executing.
    Edit,
    Cancel,
}

pub fn commit_choice(term: &Term) -> CommitChoice {
    if !term.is_term() {
        warn!("no controlling terminal available; canceling");
        return CommitChoice::Cancel;
    }
    let items = [
        "Commit with this message",
        "Edit manually (print the message and exit)",
        "Cancel",
    ];
    match Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Commit?")
        .items(&items)
        .default(0)
        .interact_on_opt(term)
    {
        Ok(Some(0)) => CommitChoice::Commit,
        Ok(Some(1)) => CommitChoice::Edit,
        Ok(_) => CommitChoice::Cancel,
        Err(err) => {
            warn!(err = %err, "commit prompt failed");
            CommitChoice::Cancel
        }
    }
}
