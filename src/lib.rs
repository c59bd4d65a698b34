//! AI-assisted generator for git/GitHub artifacts.
//!
//! ghgen turns ambient repository state (an issue, the staged diff, a
//! branch's commits) into a reviewed artifact: a branch name, a commit
//! message, an issue, or a pull request. Each workflow collects facts,
//! renders a prompt, calls the generation service, extracts a typed result,
//! and walks the user through confirming and executing it against
//! `git`/`gh`. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (extraction, prompt rendering,
//!   linked-issue parsing). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (subprocesses, HTTP, input
//!   channels). Isolated behind small adapters so tests can script them.
//!
//! Orchestration modules ([`engine`], [`select`], [`confirm`]) coordinate
//! core logic with I/O to implement the CLI workflows.

pub mod confirm;
pub mod core;
pub mod engine;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod select;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
