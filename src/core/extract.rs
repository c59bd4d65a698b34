//! Extraction of typed results from free-form model responses.
//!
//! The generation service is not contractually bound to any output format:
//! responses may carry prose, Markdown fences, or stray text around the
//! payload. Extraction is therefore maximally permissive, and fails loudly
//! (with the raw text attached) only when nothing usable can be located.

use crate::error::{Error, Result};

/// A structured title/body result, used for both issues and pull requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub body: String,
}

/// Extract a single free-text value (a branch name, a commit message).
///
/// Trims surrounding whitespace and strips wrapping code-fence markers; the
/// remainder is returned verbatim. No JSON parsing is attempted. An empty
/// remainder is the only failure.
pub fn free_text(raw: &str) -> Result<String> {
    let stripped = strip_wrapping_fences(raw);
    if stripped.is_empty() {
        return Err(Error::Extraction {
            message: "response was empty".to_string(),
            raw: raw.to_string(),
        });
    }
    Ok(stripped.to_string())
}

/// Extract a `{title, body}` object from a response that may surround it
/// with prose or fences.
///
/// The candidate substring runs from the first `{` to the last `}`
/// (inclusive), which tolerates loose boundaries without requiring them.
/// A missing `title` field falls back to `fallback_title`; a missing `body`
/// falls back to empty. No object, or an unparseable candidate, is a hard
/// failure carrying the raw text unchanged.
pub fn document(raw: &str, fallback_title: &str) -> Result<Document> {
    let candidate = match object_candidate(raw) {
        Some(candidate) => candidate,
        None => {
            return Err(Error::Extraction {
                message: "no JSON object found in response".to_string(),
                raw: raw.to_string(),
            });
        }
    };

    let value: serde_json::Value = serde_json::from_str(candidate).map_err(|e| Error::Extraction {
        message: format!("response JSON did not parse: {e}"),
        raw: raw.to_string(),
    })?;

    let title = value
        .get("title")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| fallback_title.to_string());
    let body = value
        .get("body")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(Document { title, body })
}

/// Substring between the first `{` and the last `}`, inclusive.
fn object_candidate(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Strip a wrapping ```-fence pair (with optional language tag) if present.
fn strip_wrapping_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag through the end of the fence line.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    let rest = rest.trim_end();
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_text_returns_plain_response_verbatim() {
        let text = free_text("42-fix-login-timeout\n").expect("extract");
        assert_eq!(text, "42-fix-login-timeout");
    }

    #[test]
    fn free_text_strips_wrapping_fences() {
        let raw = "```\nfeat: add login retry\n\n- handle timeout\n```";
        let text = free_text(raw).expect("extract");
        assert_eq!(text, "feat: add login retry\n\n- handle timeout");
    }

    #[test]
    fn free_text_strips_fence_language_tag() {
        let text = free_text("```text\n99-tidy-config\n```").expect("extract");
        assert_eq!(text, "99-tidy-config");
    }

    #[test]
    fn free_text_rejects_empty_response() {
        let err = free_text("```\n```").unwrap_err();
        match err {
            crate::error::Error::Extraction { raw, .. } => assert_eq!(raw, "```\n```"),
            _ => panic!("expected Extraction error"),
        }
    }

    #[test]
    fn document_parses_bare_object() {
        let doc = document(r#"{"title": "Fix login", "body": "Steps..."}"#, "fallback")
            .expect("extract");
        assert_eq!(doc.title, "Fix login");
        assert_eq!(doc.body, "Steps...");
    }

    #[test]
    fn document_tolerates_prose_and_fences() {
        let raw = "Sure! Here is the issue:\n```json\n{\"title\": \"Fix login\", \"body\": \"- a\\n- b\"}\n```\nLet me know.";
        let doc = document(raw, "fallback").expect("extract");
        assert_eq!(doc.title, "Fix login");
        assert_eq!(doc.body, "- a\n- b");
    }

    /// Stripping prose/fences must change nothing about how the embedded
    /// object parses: the result equals parsing the brace-bounded substring
    /// directly.
    #[test]
    fn document_extraction_matches_direct_parse_of_substring() {
        let inner = r#"{"title": "T", "body": "B"}"#;
        let wrapped = format!("noise before\n```json\n{inner}\n```\nnoise after");

        let from_wrapped = document(&wrapped, "fallback").expect("wrapped");
        let from_inner = document(inner, "fallback").expect("inner");
        assert_eq!(from_wrapped, from_inner);
    }

    #[test]
    fn document_fills_missing_fields_with_fallbacks() {
        let doc = document(r#"{"body": "only a body"}"#, "Change 42-fix-login").expect("extract");
        assert_eq!(doc.title, "Change 42-fix-login");
        assert_eq!(doc.body, "only a body");

        let doc = document(r#"{"title": "only a title"}"#, "fallback").expect("extract");
        assert_eq!(doc.title, "only a title");
        assert_eq!(doc.body, "");
    }

    #[test]
    fn document_without_braces_fails_with_raw_attached() {
        let raw = "I cannot produce JSON for that request.";
        let err = document(raw, "fallback").unwrap_err();
        match err {
            crate::error::Error::Extraction { raw: attached, .. } => assert_eq!(attached, raw),
            _ => panic!("expected Extraction error"),
        }
    }

    #[test]
    fn document_with_unparseable_candidate_fails() {
        let raw = "prefix {not json at all} suffix";
        let err = document(raw, "fallback").unwrap_err();
        assert!(matches!(err, crate::error::Error::Extraction { .. }));
    }

    #[test]
    fn object_candidate_spans_first_to_last_brace() {
        assert_eq!(object_candidate("a {x} b {y} c"), Some("{x} b {y}"));
        assert_eq!(object_candidate("no braces"), None);
        assert_eq!(object_candidate("} reversed {"), None);
    }
}
