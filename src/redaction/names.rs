//! Proper-name heuristic
//!
//! Runs after all rule passes, in two sub-passes:
//!
//! 1. **Context names**: a role or context word ("patient named", "doctor",
//!    "seen by", ...) followed by one or two capitalised words. Only the name
//!    is replaced; the context words stay.
//! 2. **Proper names**: two capitalised words at the start of a line, after
//!    whitespace or `: ` / `, `, or after a clinical verb, and followed by a
//!    clinical verb or punctuation. Only the name is replaced.

use crate::domain::{NoteGuardError, Result};
use crate::redaction::local::substitute;

/// Placeholder inserted for detected names
pub const NAME_PLACEHOLDER: &str = "[NAME REDACTED]";

// Trigger words are case-insensitive; the name itself must be capitalised
// (any script with case, so accented names are covered whole).
const CONTEXT_NAME_PATTERN: &str = r"\b(?i:patient\s+(?:named|is)|doctor|nurse|physician|provider|called|known\s+as|contact|seen\s+by|by|staff)\s+(?P<phi>\p{Lu}\p{Ll}+(?:\s+\p{Lu}\p{Ll}+)?)";

const PROPER_NAME_PATTERN: &str = r"(?m)(?:^|\s|:\s|,\s|presents|was\s+seen|comes\s+in|reports)(?P<phi>\p{Lu}\p{Ll}{2,}\s+\p{Lu}\p{Ll}{2,})(?:\s+(?:presents|was|comes|reports|states|denies|complains)|\.|,|;|$)";

/// Outcome of the name heuristic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRedaction {
    /// Text after both sub-passes
    pub text: String,
    /// Names replaced by the context sub-pass
    pub context_hits: usize,
    /// Names replaced by the proper-name sub-pass
    pub proper_hits: usize,
}

/// Two-stage proper-name detector
#[derive(Debug, Clone)]
pub struct NameHeuristic {
    context: fancy_regex::Regex,
    proper: fancy_regex::Regex,
}

impl NameHeuristic {
    pub fn new() -> Result<Self> {
        let compile = |pattern: &str| {
            fancy_regex::Regex::new(pattern).map_err(|e| {
                NoteGuardError::RuleLibrary(format!("Invalid name heuristic pattern: {e}"))
            })
        };

        Ok(Self {
            context: compile(CONTEXT_NAME_PATTERN)?,
            proper: compile(PROPER_NAME_PATTERN)?,
        })
    }

    /// Run the context sub-pass, then the proper-name sub-pass on its output
    pub fn redact(&self, text: &str) -> NameRedaction {
        let (text, context_hits) =
            match substitute(&self.context, NAME_PLACEHOLDER, text, "context_names") {
                Some(s) => (s.text, s.hits),
                None => (text.to_string(), 0),
            };

        let (text, proper_hits) =
            match substitute(&self.proper, NAME_PLACEHOLDER, &text, "proper_names") {
                Some(s) => (s.text, s.hits),
                None => (text, 0),
            };

        NameRedaction {
            text,
            context_hits,
            proper_hits,
        }
    }
}
