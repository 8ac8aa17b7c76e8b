//! Filename sanitization for exported page titles.

use regex::Regex;
use std::sync::OnceLock;

const MAX_LENGTH: usize = 200;

fn invalid_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[/\\:*?"<>|]"#).expect("valid pattern"))
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid pattern"))
}

/// Sanitizes a title into a safe path segment.
///
/// - Replaces path-hostile characters (`/ \ : * ? " < > |`) with `_`
/// - Strips leading/trailing whitespace and dots
/// - Collapses whitespace runs into single spaces
/// - Truncates to a bounded length
/// - Substitutes "Untitled" for an empty result
///
/// Deterministic and idempotent: sanitizing an already-sanitized name is a
/// no-op.
///
/// # Examples
///
/// ```
/// use notedown::infra::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Meeting: Q1/Q2 Plans"), "Meeting_ Q1_Q2 Plans");
/// assert_eq!(sanitize_filename("  .hidden.  "), "hidden");
/// assert_eq!(sanitize_filename(""), "Untitled");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let replaced = invalid_chars().replace_all(name, "_");
    let trimmed = replaced.trim_matches(['.', ' ']);
    let collapsed = whitespace_runs().replace_all(trimmed, " ");

    let mut sanitized: String = collapsed.chars().take(MAX_LENGTH).collect();
    if collapsed.chars().count() > MAX_LENGTH {
        sanitized = sanitized.trim_end_matches(['.', ' ']).to_string();
    }

    if sanitized.is_empty() {
        "Untitled".to_string()
    } else {
        sanitized
    }
}
