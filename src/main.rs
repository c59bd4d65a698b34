use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use ghgen::engine::{Engine, Outcome, WorkflowRequest};
use ghgen::error::{Error, Result};
use ghgen::io::config::{self, Config};
use ghgen::io::generate::GeminiClient;
use ghgen::io::gh::GhCli;
use ghgen::io::git::Git;
use ghgen::io::input::{self, IssueInput};
use ghgen::{exit_codes, logging};

#[derive(Parser)]
#[command(
    name = "ghgen",
    version,
    about = "AI-assisted generator for branch names, commit messages, issues, and pull requests"
)]
struct Cli {
    /// Path to the config file (defaults to config.yaml next to the executable).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the default config file.
    Init {
        /// Overwrite an existing config file.
        #[arg(short, long)]
        force: bool,
    },
    /// Generate a branch name from a GitHub issue and check it out.
    Branch {
        /// Issue number; omit to pick from the open issues interactively.
        issue_number: Option<u64>,
    },
    /// Generate a commit message from the staged diff and commit.
    Commit,
    /// Generate a GitHub issue from piped notes or the clipboard.
    Issue {
        /// Read the input from the clipboard instead of stdin.
        #[arg(short = 'c', long)]
        clipboard: bool,
    },
    /// Generate a pull request title and body for the current branch.
    Pr,
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(_) => std::process::exit(exit_codes::OK),
        Err(err) => {
            eprintln!("Error: {err}");
            match &err {
                Error::Extraction { raw, .. } => eprintln!("Raw response:\n{raw}"),
                Error::ExternalAction {
                    hint: Some(hint), ..
                } => eprintln!("Hint: {hint}"),
                _ => {}
            }
            std::process::exit(exit_codes::FATAL);
        }
    }
}

fn run(cli: Cli) -> Result<Outcome> {
    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };

    if let Command::Init { force } = cli.command {
        if config::write_default_config(&config_path, force)? {
            println!("Wrote {}", config_path.display());
        } else {
            println!(
                "Config already exists at {} (use --force to overwrite)",
                config_path.display()
            );
        }
        return Ok(Outcome::Executed);
    }

    let config = config::load_config(&config_path)?;
    let api_key = credential(&config)?;

    let generator = GeminiClient::new(api_key, config.global.model.clone());
    let git = Git::new(".");
    let gh = GhCli::new(
        Duration::from_secs(config.global.command_timeout_secs),
        config.global.output_limit_bytes,
    );
    let term = input::interactive_term();
    let engine = Engine::new(&config, &generator, &git, &gh, term);

    let request = match cli.command {
        Command::Init { .. } => unreachable!("handled above"),
        Command::Branch { issue_number } => WorkflowRequest::Branch {
            issue: issue_number,
        },
        Command::Commit => WorkflowRequest::Commit,
        Command::Issue { clipboard } => WorkflowRequest::Issue {
            source: if clipboard {
                IssueInput::Clipboard
            } else {
                IssueInput::Piped
            },
        },
        Command::Pr => WorkflowRequest::Pr,
    };

    engine.run(request)
}

/// Read the generation-service credential before any network call.
fn credential(config: &Config) -> Result<String> {
    let var = &config.global.api_env_var;
    std::env::var(var)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| Error::Auth { var: var.clone() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_branch_with_issue_number() {
        let cli = Cli::parse_from(["ghgen", "branch", "42"]);
        assert!(matches!(
            cli.command,
            Command::Branch {
                issue_number: Some(42)
            }
        ));
    }

    #[test]
    fn parse_branch_without_issue_number() {
        let cli = Cli::parse_from(["ghgen", "branch"]);
        assert!(matches!(
            cli.command,
            Command::Branch { issue_number: None }
        ));
    }

    #[test]
    fn parse_issue_clipboard_flag() {
        let cli = Cli::parse_from(["ghgen", "issue", "-c"]);
        assert!(matches!(cli.command, Command::Issue { clipboard: true }));

        let cli = Cli::parse_from(["ghgen", "issue"]);
        assert!(matches!(cli.command, Command::Issue { clipboard: false }));
    }

    #[test]
    fn parse_config_override() {
        let cli = Cli::parse_from(["ghgen", "--config", "/tmp/ghgen.yaml", "pr"]);
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/ghgen.yaml")));
        assert!(matches!(cli.command, Command::Pr));
    }

    #[test]
    fn credential_missing_variable_names_it() {
        let mut config = Config::default();
        config.global.api_env_var = "GHGEN_TEST_CREDENTIAL_VAR_THAT_IS_UNSET".to_string();
        let err = credential(&config).unwrap_err();
        assert!(matches!(err, Error::Auth { .. }));
        assert!(
            err.to_string()
                .contains("GHGEN_TEST_CREDENTIAL_VAR_THAT_IS_UNSET")
        );
    }

    #[test]
    fn credential_reads_present_variable() {
        let mut config = Config::default();
        config.global.api_env_var = "PATH".to_string();
        assert!(credential(&config).is_ok());
    }
}
