//! ghgen configuration (`config.yaml`).
//!
//! Loaded once at startup into an explicit value that is passed by argument
//! into every component; nothing reads process-wide state. A missing or
//! malformed document is fatal.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration document, written by `ghgen init`.
pub const DEFAULT_CONFIG: &str = include_str!("default_config.yaml");

/// Full configuration: global settings plus one prompt template per workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub global: GlobalConfig,
    pub branch: WorkflowConfig,
    pub commit: WorkflowConfig,
    pub issue: WorkflowConfig,
    pub pr: WorkflowConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Name of the environment variable holding the API credential.
    pub api_env_var: String,

    /// Generation model identifier.
    pub model: String,

    /// Base ref the PR workflow diffs commit logs against.
    pub base_branch: String,

    /// Remote the PR workflow pushes to and probes for branch existence.
    pub remote: String,

    /// Cap on open issues fetched for interactive selection.
    pub issue_list_limit: u32,

    /// Wall-clock budget for `gh` subprocess calls.
    pub command_timeout_secs: u64,

    /// Truncate captured subprocess output beyond this many bytes.
    pub output_limit_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct WorkflowConfig {
    /// Prompt template with minijinja placeholders over the workflow's facts.
    pub prompt: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            api_env_var: "GEMINI_API_KEY".to_string(),
            model: "gemini-flash-latest".to_string(),
            base_branch: "main".to_string(),
            remote: "origin".to_string(),
            issue_list_limit: 30,
            command_timeout_secs: 120,
            output_limit_bytes: 1_000_000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        serde_yaml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.global.api_env_var.trim().is_empty() {
            return Err(Error::Config("global.api_env_var must not be empty".into()));
        }
        if self.global.model.trim().is_empty() {
            return Err(Error::Config("global.model must not be empty".into()));
        }
        if self.global.issue_list_limit == 0 {
            return Err(Error::Config("global.issue_list_limit must be > 0".into()));
        }
        if self.global.command_timeout_secs == 0 {
            return Err(Error::Config(
                "global.command_timeout_secs must be > 0".into(),
            ));
        }
        if self.global.output_limit_bytes == 0 {
            return Err(Error::Config(
                "global.output_limit_bytes must be > 0".into(),
            ));
        }
        for (name, workflow) in [
            ("branch", &self.branch),
            ("commit", &self.commit),
            ("issue", &self.issue),
            ("pr", &self.pr),
        ] {
            if workflow.prompt.trim().is_empty() {
                return Err(Error::Config(format!("{name}.prompt must not be empty")));
            }
        }
        Ok(())
    }
}

/// Load and validate config from a YAML file. A missing file is fatal.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(Error::Config(format!(
            "config file not found at {} (run `ghgen init` to create it)",
            path.display()
        )));
    }
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("read {}: {e}", path.display())))?;
    let cfg: Config = serde_yaml::from_str(&contents)
        .map_err(|e| Error::Config(format!("parse {}: {e}", path.display())))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Default config location: `config.yaml` next to the executable.
pub fn default_config_path() -> Result<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|e| Error::Config(format!("resolve executable path: {e}")))?;
    let dir = exe
        .parent()
        .ok_or_else(|| Error::Config("executable has no parent directory".into()))?;
    Ok(dir.join("config.yaml"))
}

/// Write the default config document, refusing to clobber unless forced.
///
/// Returns `true` if the file was written.
pub fn write_default_config(path: &Path, force: bool) -> Result<bool> {
    if !force && path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| Error::Config(format!("create {}: {e}", parent.display())))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .map_err(|e| Error::Config(format!("write {}: {e}", path.display())))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_default_parses_and_validates() {
        let cfg = Config::default();
        cfg.validate().expect("default config valid");
        assert_eq!(cfg.global.api_env_var, "GEMINI_API_KEY");
        assert_eq!(cfg.global.issue_list_limit, 30);
        assert!(cfg.pr.prompt.contains("{{ commit_logs }}"));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = load_config(&temp.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn malformed_document_is_a_config_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.yaml");
        fs::write(&path, "global: [not, a, mapping]").expect("write");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn empty_prompt_fails_validation() {
        let mut cfg = Config::default();
        cfg.commit.prompt = "   ".to_string();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("commit.prompt"));
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.yaml");
        assert!(write_default_config(&path, false).expect("write"));
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn write_refuses_to_clobber_without_force() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.yaml");
        fs::write(&path, "custom: true").expect("seed");
        assert!(!write_default_config(&path, false).expect("write"));
        assert_eq!(fs::read_to_string(&path).expect("read"), "custom: true");
        assert!(write_default_config(&path, true).expect("force write"));
    }
}
