//! Prompt rendering: pure substitution of collected facts into a template.
//!
//! Templates come from the config document. An unresolved placeholder means
//! the template and the workflow's fact set disagree, which is a
//! configuration mistake to surface immediately, not a runtime condition to
//! recover from.

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

use crate::error::{Error, Result};

/// Render `template` with the given facts.
///
/// `name` identifies the workflow section in error messages.
pub fn render<F: Serialize>(name: &str, template: &str, facts: &F) -> Result<String> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.add_template(name, template)
        .map_err(|e| Error::Config(format!("invalid '{name}' prompt template: {e}")))?;
    let tmpl = env
        .get_template(name)
        .map_err(|e| Error::Config(format!("prompt template '{name}': {e}")))?;
    tmpl.render(facts)
        .map_err(|e| Error::Config(format!("prompt template '{name}': {e}")))
}
