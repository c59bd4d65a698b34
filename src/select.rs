//! Interactive selection of an open issue.

use console::Term;
use dialoguer::{Select, theme::ColorfulTheme};
use tracing::warn;

use crate::io::gh::IssueSummary;

/// Structured selection outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The user chose an issue.
    Chosen(u64),
    /// The user picked the cancel row, interrupted, or had no terminal.
    Canceled,
}

/// Present `issues` for single-choice selection, with an explicit cancel row.
///
/// Callers must handle the empty-candidate case themselves (it deserves an
/// informational message, not a prompt).
pub fn pick_issue(term: &Term, issues: &[IssueSummary]) -> Selection {
    if !term.is_term() {
        warn!("no controlling terminal available; cannot select an issue");
        return Selection::Canceled;
    }

    let mut items: Vec<String> = issues.iter().map(format_item).collect();
    items.push("Cancel".to_string());

    match Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Pick an issue")
        .items(&items)
        .default(0)
        .interact_on_opt(term)
    {
        Ok(Some(index)) if index < issues.len() => Selection::Chosen(issues[index].number),
        Ok(_) => Selection::Canceled,
        Err(err) => {
            warn!(err = %err, "selection prompt failed");
            Selection::Canceled
        }
    }
}

fn format_item(issue: &IssueSummary) -> String {
    format!("#{} {}", issue.number, issue.title)
}
