//! Git adapter for workflow commands.
//!
//! Reads (branch, staged diff, commit log) feed context collection; the
//! mutations (checkout, commit, push) are the workflows' terminal side
//! effects. We keep a small, explicit wrapper around `git` subprocess calls
//! so the exact argument contracts stay visible.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};

/// Sentinel returned when no commit summaries can be collected at all.
pub const NO_COMMIT_LOGS: &str = "No commit logs found.";

/// Wrapper for executing git commands in a working directory.
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
}

impl Git {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Return the current branch name (errors on detached HEAD).
    #[instrument(skip_all)]
    pub fn current_branch(&self) -> Result<String> {
        let out = self.run_collect(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        let name = out.trim().to_string();
        if name == "HEAD" {
            warn!("detached HEAD detected");
            return Err(Error::ContextCollection(
                "detached HEAD: check out a branch first".to_string(),
            ));
        }
        debug!(branch = %name, "current branch");
        Ok(name)
    }

    /// Return the staged change set as a single diff text blob.
    ///
    /// The blob may be empty (nothing staged); callers decide whether that
    /// is acceptable for their workflow.
    pub fn staged_diff(&self) -> Result<String> {
        self.run_collect(&["diff", "--cached"])
    }

    /// One-line commit summaries between `base` and HEAD.
    ///
    /// If the range fails (no such base ref) or is empty, falls back to the
    /// last 5 commits; if that also fails, returns [`NO_COMMIT_LOGS`]. This
    /// never errors: an unusable log is a degraded prompt, not a stop.
    #[instrument(skip_all, fields(base))]
    pub fn commit_summaries(&self, base: &str) -> String {
        let range = format!("{base}..HEAD");
        if let Some(text) = self.try_log(&["log", &range, "--pretty=format:- %s"]) {
            return text;
        }
        debug!(base, "base range empty or missing, falling back to last 5 commits");
        if let Some(text) = self.try_log(&["log", "-n", "5", "--pretty=format:- %s"]) {
            return text;
        }
        warn!("no commit summaries available");
        NO_COMMIT_LOGS.to_string()
    }

    fn try_log(&self, args: &[&str]) -> Option<String> {
        let out = self.run(args).ok()?;
        if !out.status.success() {
            return None;
        }
        let text = String::from_utf8_lossy(&out.stdout).trim().to_string();
        if text.is_empty() { None } else { Some(text) }
    }

    /// Check whether `branch` exists on `remote`. Read just-in-time, never
    /// cached: the answer is acted on immediately.
    #[instrument(skip_all, fields(remote, branch))]
    pub fn remote_branch_exists(&self, remote: &str, branch: &str) -> Result<bool> {
        let refspec = format!("refs/heads/{branch}");
        let out = self
            .run(&["ls-remote", "--exit-code", "--heads", remote, &refspec])
            .map_err(|e| Error::external(format!("query remote '{remote}': {e}")))?;
        if out.status.success() {
            return Ok(true);
        }
        // --exit-code yields 2 when the ref is simply absent.
        if out.status.code() == Some(2) {
            return Ok(false);
        }
        Err(Error::external(format!(
            "failed to query remote '{remote}' for branch '{branch}': {}",
            String::from_utf8_lossy(&out.stderr).trim()
        )))
    }

    /// Create and check out a new branch at current HEAD.
    #[instrument(skip_all, fields(branch))]
    pub fn checkout_new_branch(&self, branch: &str) -> Result<()> {
        debug!(branch, "creating and checking out new branch");
        self.run_mutating(
            &["checkout", "-b", branch],
            &format!("failed to create branch '{branch}'"),
        )
    }

    /// Commit staged changes with a message.
    #[instrument(skip_all)]
    pub fn commit(&self, message: &str) -> Result<()> {
        debug!("committing staged changes");
        self.run_mutating(&["commit", "-m", message], "failed to commit")
    }

    /// Push `branch` to `remote`, setting the upstream.
    #[instrument(skip_all, fields(remote, branch))]
    pub fn push_upstream(&self, remote: &str, branch: &str) -> Result<()> {
        debug!(remote, branch, "pushing branch");
        self.run_mutating(
            &["push", "-u", remote, branch],
            &format!("failed to push '{branch}' to '{remote}'"),
        )
    }

    fn run_collect(&self, args: &[&str]) -> Result<String> {
        let out = self
            .run(args)
            .map_err(|e| Error::ContextCollection(format!("run git: {e}")))?;
        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(Error::ContextCollection(format!(
                "not a git repository, or git failed: {}",
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&out.stdout).to_string())
    }

    fn run_mutating(&self, args: &[&str], failure: &str) -> Result<()> {
        let out = self
            .run(args)
            .map_err(|e| Error::external(format!("{failure}: {e}")))?;
        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(Error::external(format!("{failure}: {}", stderr.trim())));
        }
        Ok(())
    }

    fn run(&self, args: &[&str]) -> std::io::Result<Output> {
        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestRepo;

    #[test]
    fn current_branch_reports_repo_branch() {
        let repo = TestRepo::new();
        let git = Git::new(repo.root());
        assert_eq!(git.current_branch().expect("branch"), "main");
    }

    #[test]
    fn current_branch_outside_a_repo_is_a_collection_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let git = Git::new(temp.path());
        let err = git.current_branch().unwrap_err();
        assert!(matches!(err, Error::ContextCollection(_)));
    }

    #[test]
    fn staged_diff_is_empty_until_something_is_staged() {
        let repo = TestRepo::new();
        let git = Git::new(repo.root());
        assert!(git.staged_diff().expect("diff").trim().is_empty());

        repo.write("notes.txt", "hello\n");
        repo.git(&["add", "notes.txt"]);
        let diff = git.staged_diff().expect("diff");
        assert!(diff.contains("+hello"));
    }

    #[test]
    fn commit_summaries_fall_back_to_recent_commits() {
        let repo = TestRepo::new();
        let git = Git::new(repo.root());
        // The base ref does not exist; the fallback covers the seed commit.
        let logs = git.commit_summaries("no-such-base");
        assert!(logs.contains("- chore: initial commit"));
    }

    #[test]
    fn commit_summaries_never_error_even_without_a_repo() {
        let temp = tempfile::tempdir().expect("tempdir");
        let git = Git::new(temp.path());
        assert_eq!(git.commit_summaries("main"), NO_COMMIT_LOGS);
    }

    #[test]
    fn commit_summaries_use_base_range_when_present() {
        let repo = TestRepo::new();
        let git = Git::new(repo.root());
        git.checkout_new_branch("42-feature").expect("checkout");
        repo.write("feature.txt", "work\n");
        repo.git(&["add", "feature.txt"]);
        git.commit("feat: add feature file").expect("commit");

        let logs = git.commit_summaries("main");
        assert_eq!(logs, "- feat: add feature file");
    }

    #[test]
    fn checkout_new_branch_switches_and_collides() {
        let repo = TestRepo::new();
        let git = Git::new(repo.root());
        git.checkout_new_branch("7-new-work").expect("checkout");
        assert_eq!(git.current_branch().expect("branch"), "7-new-work");

        let err = git.checkout_new_branch("7-new-work").unwrap_err();
        assert!(matches!(err, Error::ExternalAction { .. }));
    }

    #[test]
    fn commit_records_the_message() {
        let repo = TestRepo::new();
        let git = Git::new(repo.root());
        repo.write("a.txt", "a\n");
        repo.git(&["add", "a.txt"]);
        git.commit("fix: record message").expect("commit");
        let last = repo.git(&["log", "-1", "--pretty=%s"]);
        assert_eq!(last, "fix: record message");
    }

    #[test]
    fn remote_branch_probe_tracks_push_state() {
        let repo = TestRepo::new();
        repo.add_bare_remote("origin");
        let git = Git::new(repo.root());

        assert!(!git.remote_branch_exists("origin", "main").expect("probe"));
        git.push_upstream("origin", "main").expect("push");
        assert!(git.remote_branch_exists("origin", "main").expect("probe"));
    }

    #[test]
    fn remote_branch_probe_fails_for_unknown_remote() {
        let repo = TestRepo::new();
        let git = Git::new(repo.root());
        let err = git.remote_branch_exists("nowhere", "main").unwrap_err();
        assert!(matches!(err, Error::ExternalAction { .. }));
    }
}
