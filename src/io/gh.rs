//! GitHub CLI adapter.
//!
//! All tracker access goes through `gh`, keeping its flag and `--json` field
//! contracts in one place. Reads return parsed JSON; mutations return the
//! command's stdout (typically the created URL) for display.

use std::process::Command;
use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::io::process::{CommandOutput, run_command_with_timeout};

/// A single issue fetched by number (`gh issue view --json title,url`).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct IssueDetails {
    pub title: String,
    pub url: String,
}

/// One row of `gh issue list --json number,title`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct IssueSummary {
    pub number: u64,
    pub title: String,
}

/// One row of `gh pr list --json number,url`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PrRef {
    pub number: u64,
    pub url: String,
}

/// Wrapper for executing `gh` commands.
#[derive(Debug, Clone)]
pub struct GhCli {
    timeout: Duration,
    output_limit_bytes: usize,
}

impl GhCli {
    pub fn new(timeout: Duration, output_limit_bytes: usize) -> Self {
        Self {
            timeout,
            output_limit_bytes,
        }
    }

    /// Fetch one issue's title and url.
    #[instrument(skip_all, fields(number))]
    pub fn view_issue(&self, number: u64) -> Result<IssueDetails> {
        let number_arg = number.to_string();
        let out = self.run_collect(
            &["issue", "view", &number_arg, "--json", "title,url"],
            &format!("could not fetch issue #{number} (check that the issue exists)"),
        )?;
        parse_gh_json(&out.stdout_text())
    }

    /// List open issues, bounded by `limit`.
    #[instrument(skip_all, fields(limit))]
    pub fn list_open_issues(&self, limit: u32) -> Result<Vec<IssueSummary>> {
        let limit_arg = limit.to_string();
        let out = self.run_collect(
            &[
                "issue",
                "list",
                "--state",
                "open",
                "--limit",
                &limit_arg,
                "--json",
                "number,title",
            ],
            "could not list open issues",
        )?;
        parse_gh_json(&out.stdout_text())
    }

    /// The open pull request whose head is `branch`, if any.
    #[instrument(skip_all, fields(branch))]
    pub fn open_pr_for_branch(&self, branch: &str) -> Result<Option<PrRef>> {
        let out = self.run_collect(
            &[
                "pr",
                "list",
                "--head",
                branch,
                "--state",
                "open",
                "--json",
                "number,url",
            ],
            &format!("could not list pull requests for '{branch}'"),
        )?;
        let prs: Vec<PrRef> = parse_gh_json(&out.stdout_text())?;
        Ok(prs.into_iter().next())
    }

    /// Create an issue; returns `gh`'s stdout (the created URL).
    #[instrument(skip_all)]
    pub fn create_issue(&self, title: &str, body: &str) -> Result<String> {
        let out = self.run_mutating(
            &["issue", "create", "--title", title, "--body", body],
            "failed to create issue",
            None,
        )?;
        Ok(out.stdout_text())
    }

    /// Create a pull request; returns `gh`'s stdout (the created URL).
    #[instrument(skip_all)]
    pub fn create_pr(&self, title: &str, body: &str) -> Result<String> {
        let out = self.run_mutating(
            &["pr", "create", "--title", title, "--body", body],
            "failed to create pull request",
            Some("Did you run `git push`? And does the base branch match?"),
        )?;
        Ok(out.stdout_text())
    }

    /// Open a pull request in the browser.
    #[instrument(skip_all, fields(number))]
    pub fn open_pr_in_browser(&self, number: u64) -> Result<()> {
        let number_arg = number.to_string();
        self.run_mutating(
            &["pr", "view", &number_arg, "--web"],
            &format!("failed to open pull request #{number}"),
            None,
        )?;
        Ok(())
    }

    fn run_collect(&self, args: &[&str], failure: &str) -> Result<CommandOutput> {
        let out = self
            .run(args)
            .map_err(|e| Error::ContextCollection(format!("{failure}: {e}")))?;
        if out.timed_out {
            return Err(Error::ContextCollection(format!("{failure}: gh timed out")));
        }
        if !out.status.success() {
            return Err(Error::ContextCollection(format!(
                "{failure}: {}",
                out.stderr_text().trim()
            )));
        }
        Ok(out)
    }

    fn run_mutating(
        &self,
        args: &[&str],
        failure: &str,
        hint: Option<&str>,
    ) -> Result<CommandOutput> {
        let fail = |detail: String| match hint {
            Some(hint) => Error::external_with_hint(format!("{failure}: {detail}"), hint),
            None => Error::external(format!("{failure}: {detail}")),
        };
        let out = self.run(args).map_err(|e| fail(e.to_string()))?;
        if out.timed_out {
            return Err(fail("gh timed out".to_string()));
        }
        if !out.status.success() {
            return Err(fail(out.stderr_text().trim().to_string()));
        }
        Ok(out)
    }

    fn run(&self, args: &[&str]) -> anyhow::Result<CommandOutput> {
        debug!(?args, "running gh");
        let mut cmd = Command::new("gh");
        cmd.args(args);
        run_command_with_timeout(cmd, None, self.timeout, self.output_limit_bytes)
    }
}

/// Decode a `gh --json` payload; a decode failure means the CLI contract
/// drifted, reported as a collection error with the decode detail.
fn parse_gh_json<T: DeserializeOwned>(stdout: &str) -> Result<T> {
    serde_json::from_str(stdout)
        .map_err(|e| Error::ContextCollection(format!("failed to parse GitHub CLI output: {e}")))
}
