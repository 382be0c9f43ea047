//! Local rule-based redaction
//!
//! [`LocalRedactor`] applies the rule table category by category and rule by
//! rule, each rule seeing the output of the previous one, then runs the
//! [`NameHeuristic`]. Every step is a pure `&str -> String` transformation.
//!
//! A match that overlaps a placeholder inserted earlier is left alone, so
//! running the redactor over its own output changes nothing.

use crate::domain::Result;
use crate::redaction::names::NameHeuristic;
use crate::redaction::placeholder::{overlaps_any, protected_spans};
use crate::redaction::rules::{RuleCategory, RuleTable};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Result of one guarded substitution that replaced at least one match
#[derive(Debug)]
pub(crate) struct Substitution {
    pub text: String,
    pub hits: usize,
}

/// Replace every match of `regex` in `text` with `placeholder`
///
/// When the pattern has a capture group named `phi`, only that group is
/// replaced. Returns `None` when nothing was replaced. A backtracking runtime
/// error stops the scan; text after that point is left as it was.
pub(crate) fn substitute(
    regex: &fancy_regex::Regex,
    placeholder: &str,
    text: &str,
    rule: &str,
) -> Option<Substitution> {
    let protected = protected_spans(text);
    let mut output = String::with_capacity(text.len());
    let mut last = 0;
    let mut hits = 0;

    for captures in regex.captures_iter(text) {
        let captures = match captures {
            Ok(captures) => captures,
            Err(e) => {
                tracing::warn!(rule, error = %e, "Rule stopped early on a matching error");
                break;
            }
        };

        let Some(target) = captures.name("phi").or_else(|| captures.get(0)) else {
            continue;
        };
        let range = target.start()..target.end();
        if range.is_empty() || range.start < last || overlaps_any(&range, &protected) {
            continue;
        }

        output.push_str(&text[last..range.start]);
        output.push_str(placeholder);
        last = range.end;
        hits += 1;
    }

    if hits == 0 {
        return None;
    }

    output.push_str(&text[last..]);
    Some(Substitution { text: output, hits })
}

/// A stage of the local redactor, in application order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedactionPass {
    Structured,
    Clinical,
    Contextual,
    ContextNames,
    ProperNames,
}

impl From<RuleCategory> for RedactionPass {
    fn from(category: RuleCategory) -> Self {
        match category {
            RuleCategory::Structured => Self::Structured,
            RuleCategory::Clinical => Self::Clinical,
            RuleCategory::Contextual => Self::Contextual,
        }
    }
}

impl fmt::Display for RedactionPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Structured => "structured",
            Self::Clinical => "clinical",
            Self::Contextual => "contextual",
            Self::ContextNames => "context_names",
            Self::ProperNames => "proper_names",
        };
        f.write_str(label)
    }
}

/// Number of replacements one rule made
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleHit {
    pub pass: RedactionPass,
    pub rule: String,
    pub hits: usize,
}

/// Which rules fired, in the order they fired
///
/// Only counts are recorded, never matched text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RedactionReport {
    pub rule_version: String,
    pub hits: Vec<RuleHit>,
}

impl RedactionReport {
    fn record(&mut self, pass: RedactionPass, rule: &str, hits: usize) {
        self.hits.push(RuleHit {
            pass,
            rule: rule.to_string(),
            hits,
        });
    }

    /// Total replacements across all rules
    pub fn total_hits(&self) -> usize {
        self.hits.iter().map(|h| h.hits).sum()
    }

    /// Replacements made by a single rule
    pub fn hits_for(&self, rule: &str) -> usize {
        self.hits
            .iter()
            .filter(|h| h.rule == rule)
            .map(|h| h.hits)
            .sum()
    }

    /// Passes that changed the text, in order, without repeats
    pub fn passes(&self) -> Vec<RedactionPass> {
        let mut passes: Vec<RedactionPass> = Vec::new();
        for hit in &self.hits {
            if passes.last() != Some(&hit.pass) {
                passes.push(hit.pass);
            }
        }
        passes
    }
}

/// Output of the local redactor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRedaction {
    /// Text after all passes
    pub text: String,
    /// Whether any rule or name sub-pass altered the text
    pub changed: bool,
}

impl LocalRedaction {
    fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            changed: false,
        }
    }
}

/// Applies the shared rule table and the name heuristic to note text
#[derive(Debug, Clone)]
pub struct LocalRedactor {
    table: Arc<RuleTable>,
    names: Arc<NameHeuristic>,
}

impl LocalRedactor {
    /// Create a redactor over a shared rule table
    pub fn new(table: Arc<RuleTable>) -> Result<Self> {
        Ok(Self {
            table,
            names: Arc::new(NameHeuristic::new()?),
        })
    }

    /// Create a redactor over the built-in rule library
    pub fn builtin() -> Result<Self> {
        Self::new(Arc::new(RuleTable::builtin()?))
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Redact `text`; empty or blank input comes back unchanged
    pub fn redact(&self, text: &str) -> LocalRedaction {
        self.redact_with_report(text).0
    }

    /// Redact a note that may be missing altogether
    pub fn redact_opt(&self, text: Option<&str>) -> LocalRedaction {
        self.redact(text.unwrap_or_default())
    }

    /// Redact `text` and report which rules fired
    pub fn redact_with_report(&self, text: &str) -> (LocalRedaction, RedactionReport) {
        let mut report = RedactionReport {
            rule_version: self.table.version().to_string(),
            hits: Vec::new(),
        };

        if text.trim().is_empty() {
            return (LocalRedaction::unchanged(text), report);
        }

        let mut current = text.to_string();
        for rule in self.table.all_rules() {
            if let Some(substitution) =
                substitute(rule.regex(), rule.placeholder(), &current, rule.name())
            {
                report.record(rule.category().into(), rule.name(), substitution.hits);
                current = substitution.text;
            }
        }

        let names = self.names.redact(&current);
        if names.context_hits > 0 {
            report.record(RedactionPass::ContextNames, "context_names", names.context_hits);
        }
        if names.proper_hits > 0 {
            report.record(RedactionPass::ProperNames, "proper_names", names.proper_hits);
        }

        let changed = report.total_hits() > 0;
        tracing::trace!(
            rules_fired = report.hits.len(),
            replacements = report.total_hits(),
            "Local redaction finished"
        );

        (
            LocalRedaction {
                text: names.text,
                changed,
            },
            report,
        )
    }
}
