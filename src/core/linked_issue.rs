//! Linked-issue derivation from branch names.
//!
//! Branches created by the branch workflow are named `<issue>-<kebab-desc>`,
//! so a leading numeric prefix ties a branch back to its issue. Absence of
//! the prefix is an expected state, not an error.

use std::sync::LazyLock;

use regex::Regex;

static LINKED_ISSUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)-").expect("linked-issue pattern is valid"));

/// Result of matching a branch name against the `<issue>-` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkedIssue {
    /// Branch carries a leading issue number.
    Linked(u64),
    /// No leading numeric prefix; the branch has no linked issue.
    None,
}

impl LinkedIssue {
    pub fn number(self) -> Option<u64> {
        match self {
            LinkedIssue::Linked(n) => Some(n),
            LinkedIssue::None => None,
        }
    }
}

/// Derive the linked issue from a branch name.
pub fn parse(branch_name: &str) -> LinkedIssue {
    let Some(caps) = LINKED_ISSUE_RE.captures(branch_name) else {
        return LinkedIssue::None;
    };
    match caps[1].parse::<u64>() {
        Ok(n) => LinkedIssue::Linked(n),
        // Prefix longer than u64 (pathological); treat as unlinked.
        Err(_) => LinkedIssue::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_prefix_yields_issue_number() {
        assert_eq!(parse("42-fix-login"), LinkedIssue::Linked(42));
        assert_eq!(parse("7-a"), LinkedIssue::Linked(7));
    }

    #[test]
    fn missing_prefix_yields_sentinel_not_error() {
        assert_eq!(parse("hotfix-login"), LinkedIssue::None);
        assert_eq!(parse("main"), LinkedIssue::None);
        assert_eq!(parse(""), LinkedIssue::None);
    }

    #[test]
    fn digits_without_dash_do_not_link() {
        assert_eq!(parse("42fix"), LinkedIssue::None);
        assert_eq!(parse("42"), LinkedIssue::None);
    }

    #[test]
    fn number_accessor_maps_variants() {
        assert_eq!(parse("88-refactor").number(), Some(88));
        assert_eq!(parse("refactor").number(), None);
    }
}
