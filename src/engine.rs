//! The confirmation & execution engine shared by the four workflows.
//!
//! Every workflow runs the same pipeline: collect context, render the prompt,
//! call the generator, extract a typed artifact, present it, confirm, and
//! only then perform the single mutating call. Side effects are confined to
//! the post-confirmation step (plus the PR workflow's nested push dialog);
//! everything before it is read-only against git and the tracker.

use console::{Term, style};

use crate::confirm::{self, CommitChoice};
use crate::core::context::{BranchFacts, CommitFacts, IssueFacts, PrFacts};
use crate::core::extract::{self, Document};
use crate::core::linked_issue::{self, LinkedIssue};
use crate::core::prompt;
use crate::error::{Error, Result};
use crate::io::config::Config;
use crate::io::generate::Generator;
use crate::io::gh::GhCli;
use crate::io::git::Git;
use crate::io::input::{self, IssueInput};
use crate::select::{self, Selection};

/// One workflow invocation. A closed set: the engine supports exactly these
/// four request shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowRequest {
    /// Generate a branch name from an issue and check it out.
    Branch { issue: Option<u64> },
    /// Generate a commit message from the staged diff and commit.
    Commit,
    /// Generate an issue from piped notes or the clipboard.
    Issue { source: IssueInput },
    /// Generate a pull request for the current branch.
    Pr,
}

/// Terminal pipeline outcome. All variants exit 0; fatal conditions are
/// `Err` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The mutating call succeeded.
    Executed,
    /// An open PR already exists for the branch; nothing was created.
    AlreadyExists,
    /// The user declined, interrupted, or there was nothing to pick.
    Canceled,
}

/// Workflow engine: owns no state beyond borrowed collaborators.
pub struct Engine<'a, G: Generator> {
    config: &'a Config,
    generator: &'a G,
    git: &'a Git,
    gh: &'a GhCli,
    term: Term,
}

impl<'a, G: Generator> Engine<'a, G> {
    pub fn new(
        config: &'a Config,
        generator: &'a G,
        git: &'a Git,
        gh: &'a GhCli,
        term: Term,
    ) -> Self {
        Self {
            config,
            generator,
            git,
            gh,
            term,
        }
    }

    pub fn run(&self, request: WorkflowRequest) -> Result<Outcome> {
        match request {
            WorkflowRequest::Branch { issue } => self.run_branch(issue),
            WorkflowRequest::Commit => self.run_commit(),
            WorkflowRequest::Issue { source } => self.run_issue(source),
            WorkflowRequest::Pr => self.run_pr(),
        }
    }

    fn run_branch(&self, issue: Option<u64>) -> Result<Outcome> {
        let issue_number = match issue {
            Some(number) => number,
            None => {
                let issues = self
                    .gh
                    .list_open_issues(self.config.global.issue_list_limit)?;
                if issues.is_empty() {
                    println!("No open issues found.");
                    return Ok(Outcome::Canceled);
                }
                match select::pick_issue(&self.term, &issues) {
                    Selection::Chosen(number) => number,
                    Selection::Canceled => return Ok(canceled()),
                }
            }
        };

        println!("Fetching issue #{issue_number}...");
        let issue = self.gh.view_issue(issue_number)?;

        let sep = "=".repeat(40);
        println!("\n{sep}");
        println!("Issue: #{issue_number} {}", issue.title);
        println!("URL  : {}", issue.url);
        println!("{sep}\n");
        println!("Generating a branch name...");

        let facts = BranchFacts {
            issue_number,
            issue_title: issue.title,
            issue_url: issue.url,
        };
        let rendered = prompt::render("branch", &self.config.branch.prompt, &facts)?;
        let raw = self.generator.generate(&rendered)?;
        let branch = extract::free_text(&raw)?;

        println!("Proposed branch: {}", style(&branch).green().bold());

        if !confirm::confirm(&self.term, "Create and check out this branch?", true) {
            return Ok(canceled());
        }

        println!("Running: git checkout -b {branch}");
        self.git.checkout_new_branch(&branch)?;
        println!("Done! 🚀");
        Ok(Outcome::Executed)
    }

    fn run_commit(&self) -> Result<Outcome> {
        let diff = self.git.staged_diff()?;
        if diff.trim().is_empty() {
            return Err(Error::ContextCollection(
                "no staged changes found (run `git add` first)".to_string(),
            ));
        }

        println!("Analyzing staged changes and generating a commit message...");
        let facts = CommitFacts { diff_text: diff };
        let rendered = prompt::render("commit", &self.config.commit.prompt, &facts)?;
        let raw = self.generator.generate(&rendered)?;
        let message = extract::free_text(&raw)?;

        let sep = "-".repeat(40);
        println!("\n{}", style("Proposed commit message:").cyan().bold());
        println!("{sep}\n{message}\n{sep}");

        match confirm::commit_choice(&self.term) {
            CommitChoice::Commit => {
                println!("Committing...");
                self.git.commit(&message)?;
                println!("Done! 🚀");
                Ok(Outcome::Executed)
            }
            CommitChoice::Edit => {
                println!("\n{message}\n");
                println!("Copy the message above and run `git commit` manually.");
                Ok(Outcome::Canceled)
            }
            CommitChoice::Cancel => Ok(canceled()),
        }
    }

    fn run_issue(&self, source: IssueInput) -> Result<Outcome> {
        // The piped channel is fully drained here, before the first prompt;
        // prompts read from the terminal channel, never from stdin.
        let input_text = input::read_issue_input(source)?;

        println!(
            "Analyzing input ({} chars) and generating an issue...",
            input_text.chars().count()
        );
        let facts = IssueFacts { input_text };
        let rendered = prompt::render("issue", &self.config.issue.prompt, &facts)?;
        let raw = self.generator.generate(&rendered)?;
        let doc = extract::document(&raw, "No Title")?;

        present_document("Proposed issue:", &doc);

        if !confirm::confirm(&self.term, "Create this issue?", true) {
            return Ok(canceled());
        }

        println!("Creating issue...");
        let created = self.gh.create_issue(&doc.title, &doc.body)?;
        print_created(&created);
        println!("Done! 🚀");
        Ok(Outcome::Executed)
    }

    fn run_pr(&self) -> Result<Outcome> {
        let branch = self.git.current_branch()?;

        // Idempotency pre-check: a re-run stops here, before spending a
        // generation request or prompting at all.
        if let Some(pr) = self.gh.open_pr_for_branch(&branch)? {
            println!(
                "An open pull request already exists for '{branch}': {}",
                pr.url
            );
            if confirm::confirm(&self.term, "Open it in the browser?", false) {
                self.gh.open_pr_in_browser(pr.number)?;
            }
            return Ok(Outcome::AlreadyExists);
        }

        println!("Collecting context for branch '{branch}'...");
        let (issue_number, issue_title) = self.linked_issue_facts(&branch);
        let commit_logs = self.git.commit_summaries(&self.config.global.base_branch);

        println!("Generating a pull request description...");
        let fallback_title = format!("Change {branch}");
        let facts = PrFacts {
            branch_name: branch.clone(),
            issue_number,
            issue_title,
            commit_logs,
        };
        let rendered = prompt::render("pr", &self.config.pr.prompt, &facts)?;
        let raw = self.generator.generate(&rendered)?;
        let doc = extract::document(&raw, &fallback_title)?;

        present_document("Proposed pull request:", &doc);

        if !confirm::confirm(&self.term, "Create this pull request?", true) {
            return Ok(canceled());
        }

        // Remote state is read immediately before being acted upon.
        let remote = &self.config.global.remote;
        if !self.git.remote_branch_exists(remote, &branch)? {
            println!("Branch '{branch}' does not exist on '{remote}' yet.");
            let push_prompt = format!("Push '{branch}' to '{remote}' now?");
            if !confirm::confirm(&self.term, &push_prompt, true) {
                return Ok(canceled());
            }
            println!("Running: git push -u {remote} {branch}");
            self.git.push_upstream(remote, &branch)?;
        }

        println!("Creating pull request...");
        let created = self.gh.create_pr(&doc.title, &doc.body)?;
        print_created(&created);
        println!("Done! 🚀");
        Ok(Outcome::Executed)
    }

    /// Linked-issue facts for the PR prompt. The stable `"None"`/`"None"`
    /// pair stands in when the branch has no numeric prefix, and a failed
    /// title fetch degrades to `"Unknown Title"` rather than stopping.
    fn linked_issue_facts(&self, branch: &str) -> (String, String) {
        match linked_issue::parse(branch) {
            LinkedIssue::Linked(number) => match self.gh.view_issue(number) {
                Ok(issue) => {
                    println!("Found related issue: #{number} {}", issue.title);
                    (number.to_string(), issue.title)
                }
                Err(_) => (number.to_string(), "Unknown Title".to_string()),
            },
            LinkedIssue::None => ("None".to_string(), "None".to_string()),
        }
    }
}

fn canceled() -> Outcome {
    println!("Canceled.");
    Outcome::Canceled
}

fn present_document(heading: &str, doc: &Document) {
    let sep = "-".repeat(60);
    println!("\n{}", style(heading).cyan().bold());
    println!("{sep}");
    println!("{} {}", style("Title:").bold(), doc.title);
    println!("{sep}");
    println!("{}", doc.body);
    println!("{sep}");
}

fn print_created(output: &str) {
    let trimmed = output.trim();
    if !trimmed.is_empty() {
        println!("{trimmed}");
    }
}
