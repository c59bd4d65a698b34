//! Per-workflow fact sets substituted into prompt templates.
//!
//! Each workflow collects a fixed set of named facts; field names are the
//! placeholder names available to the corresponding template. Facts are
//! built once per invocation and never mutated afterwards.

use serde::Serialize;

/// Facts for the branch-name workflow.
#[derive(Debug, Clone, Serialize)]
pub struct BranchFacts {
    pub issue_number: u64,
    pub issue_title: String,
    pub issue_url: String,
}

/// Facts for the commit-message workflow.
#[derive(Debug, Clone, Serialize)]
pub struct CommitFacts {
    pub diff_text: String,
}

/// Facts for the issue workflow.
#[derive(Debug, Clone, Serialize)]
pub struct IssueFacts {
    pub input_text: String,
}

/// Facts for the pull-request workflow.
///
/// `issue_number`/`issue_title` are the literal string `"None"` when the
/// branch has no linked issue, so templates render a stable placeholder
/// instead of failing.
#[derive(Debug, Clone, Serialize)]
pub struct PrFacts {
    pub branch_name: String,
    pub issue_number: String,
    pub issue_title: String,
    pub commit_logs: String,
}
