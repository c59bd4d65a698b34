//! Test-only helpers: throwaway git repositories and a scripted terminal.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use console::Term;

/// A temporary git repository with one seed commit on `main`.
///
/// The repository lives under a subdirectory of the tempdir so bare remotes
/// can be created as siblings.
pub struct TestRepo {
    temp: tempfile::TempDir,
    root: PathBuf,
}

impl TestRepo {
    pub fn new() -> Self {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("repo");
        fs::create_dir(&root).expect("create repo dir");

        run_git(&root, &["init", "-b", "main"]);
        run_git(&root, &["config", "user.name", "Test User"]);
        run_git(&root, &["config", "user.email", "test@example.com"]);
        fs::write(root.join("README.md"), "# test\n").expect("write seed file");
        run_git(&root, &["add", "."]);
        run_git(&root, &["commit", "-m", "chore: initial commit"]);

        Self { temp, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run a git command in the repository, asserting success.
    pub fn git(&self, args: &[&str]) -> String {
        run_git(&self.root, args)
    }

    /// Write a file relative to the repository root.
    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(path, contents).expect("write file");
    }

    /// Create a sibling bare repository and register it as a remote.
    pub fn add_bare_remote(&self, name: &str) -> PathBuf {
        let dir = self.temp.path().join(format!("{name}.git"));
        let dir_str = dir.to_str().expect("utf-8 path");
        run_git(self.temp.path(), &["init", "--bare", dir_str]);
        run_git(&self.root, &["remote", "add", name, dir_str]);
        dir
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}

fn run_git(root: &Path, args: &[&str]) -> String {
    let out = Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .expect("run git");
    assert!(
        out.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).trim().to_string()
}

/// A terminal wired to `/dev/null`: prompts deterministically resolve to
/// their declined/canceled path regardless of the test environment.
pub fn null_term() -> Term {
    let read = fs::File::open("/dev/null").expect("open /dev/null for reading");
    let write = fs::OpenOptions::new()
        .write(true)
        .open("/dev/null")
        .expect("open /dev/null for writing");
    Term::read_write_pair(read, write)
}
