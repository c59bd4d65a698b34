//! Typed error taxonomy for one `ghgen` invocation.
//!
//! Every variant is fatal and handled once, at the top of `main`: one
//! descriptive line on stderr and exit code 1. User cancellation is never an
//! error; workflows return [`crate::engine::Outcome::Canceled`] instead, and
//! the process exits 0.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed configuration, or a prompt template referencing
    /// a placeholder the workflow does not provide.
    #[error("configuration error: {0}")]
    Config(String),

    /// The generation-service credential variable is unset.
    #[error("{var} environment variable is not set")]
    Auth { var: String },

    /// Repository or tracker state could not be collected (not a repository,
    /// issue id unresolved, nothing staged, no usable input).
    #[error("{0}")]
    ContextCollection(String),

    /// The remote generation call failed or returned nothing.
    #[error("generation request failed: {0}")]
    Generation(String),

    /// The response held no locatable structured payload. Carries the raw
    /// text unchanged so the user can diagnose it.
    #[error("could not extract a result from the response: {message}")]
    Extraction { message: String, raw: String },

    /// The mutating external command failed (branch collision, rejected
    /// push, PR creation refused, ...).
    #[error("{message}")]
    ExternalAction {
        message: String,
        hint: Option<String>,
    },
}

impl Error {
    pub fn external(message: impl Into<String>) -> Self {
        Error::ExternalAction {
            message: message.into(),
            hint: None,
        }
    }

    pub fn external_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Error::ExternalAction {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_error_names_the_variable() {
        let err = Error::Auth {
            var: "GEMINI_API_KEY".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "GEMINI_API_KEY environment variable is not set"
        );
    }

    #[test]
    fn extraction_error_keeps_raw_text() {
        let err = Error::Extraction {
            message: "no JSON object found".to_string(),
            raw: "I could not help with that.".to_string(),
        };
        match &err {
            Error::Extraction { raw, .. } => {
                assert_eq!(raw, "I could not help with that.");
            }
            _ => panic!("expected Extraction variant"),
        }
    }

    #[test]
    fn external_action_carries_optional_hint() {
        let plain = Error::external("push rejected");
        assert!(matches!(
            plain,
            Error::ExternalAction { hint: None, .. }
        ));

        let hinted = Error::external_with_hint("PR creation failed", "Did you push?");
        match hinted {
            Error::ExternalAction { hint, .. } => assert_eq!(hint.as_deref(), Some("Did you push?")),
            _ => panic!("expected ExternalAction variant"),
        }
    }
}
