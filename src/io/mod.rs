//! I/O adapters: subprocesses, the GitHub CLI, the generation service, and
//! the two user-input channels.

pub mod config;
pub mod generate;
pub mod gh;
pub mod git;
pub mod input;
pub mod process;
