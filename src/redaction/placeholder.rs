//! Placeholder tokens
//!
//! Every replacement the pipeline inserts has the shape `[LABEL REDACTED]`
//! (local rules) or `[LABEL_REDACTED]` (remote operators). Text inside such a
//! token is never matched again by a later rule.

use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| {
        Regex::new(r"\[[A-Z0-9_]+[ _]REDACTED\]").expect("placeholder token regex is valid")
    })
}

/// Check whether `value` is exactly one placeholder token
pub fn is_placeholder(value: &str) -> bool {
    token_regex()
        .find(value)
        .is_some_and(|m| m.start() == 0 && m.end() == value.len())
}

/// Byte ranges of all placeholder tokens in `text`, in ascending order
pub fn protected_spans(text: &str) -> Vec<Range<usize>> {
    token_regex().find_iter(text).map(|m| m.range()).collect()
}

/// Check whether `range` touches any of the (sorted) protected spans
pub fn overlaps_any(range: &Range<usize>, spans: &[Range<usize>]) -> bool {
    spans
        .iter()
        .take_while(|span| span.start < range.end)
        .any(|span| span.end > range.start)
}
