//! Rule library for local PHI redaction
//!
//! The rule table is built once at startup from a TOML library (the built-in
//! one is embedded in the binary) and then shared read-only. Rules are grouped
//! into three ordered categories; the order of rules inside each category is
//! the order in which they appear in the library file.

use crate::domain::{NoteGuardError, Result};
use crate::redaction::placeholder::is_placeholder;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const BUILTIN_LIBRARY: &str = include_str!("../../../rules/phi_rules.toml");

/// Rule category, listed in pass order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// Identifiers with a fixed shape (SSN, phone, MRN, dates of birth, ...)
    Structured,
    /// Diagnoses, medications, lab values and sensitive conditions
    Clinical,
    /// Context-dependent heuristics (relatives, employers, places, ages)
    Contextual,
}

impl RuleCategory {
    /// All categories in the order they are applied
    pub const PASS_ORDER: [RuleCategory; 3] = [Self::Structured, Self::Clinical, Self::Contextual];

    /// Lower-case label used in the rule library and on the CLI
    pub fn label(&self) -> &'static str {
        match self {
            Self::Structured => "structured",
            Self::Clinical => "clinical",
            Self::Contextual => "contextual",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RuleCategory {
    type Err = NoteGuardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "structured" => Ok(Self::Structured),
            "clinical" => Ok(Self::Clinical),
            "contextual" => Ok(Self::Contextual),
            _ => Err(NoteGuardError::Validation(format!(
                "Unknown rule category: {s}. Must be one of: structured, clinical, contextual"
            ))),
        }
    }
}

/// Rule definition as written in the TOML library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleDefinition {
    /// Unique rule name
    pub name: String,
    /// Regular expression (look-around allowed)
    pub pattern: String,
    /// Literal replacement text
    pub placeholder: String,
    /// Match letters in any case
    #[serde(default = "default_true")]
    pub case_insensitive: bool,
    /// `^` and `$` match at line boundaries
    #[serde(default = "default_true")]
    pub multiline: bool,
}

fn default_true() -> bool {
    true
}

/// Library container
#[derive(Debug, Deserialize)]
struct RuleLibrary {
    version: String,
    #[serde(default)]
    structured: Vec<RuleDefinition>,
    #[serde(default)]
    clinical: Vec<RuleDefinition>,
    #[serde(default)]
    contextual: Vec<RuleDefinition>,
}

/// A compiled pattern→placeholder rule
#[derive(Debug, Clone)]
pub struct RedactionRule {
    name: String,
    category: RuleCategory,
    pattern: String,
    placeholder: String,
    case_insensitive: bool,
    multiline: bool,
    regex: fancy_regex::Regex,
}

impl RedactionRule {
    /// Compile a rule definition
    ///
    /// Matching flags are applied explicitly per rule as inline flags.
    pub fn compile(category: RuleCategory, definition: RuleDefinition) -> Result<Self> {
        if definition.pattern.trim().is_empty() {
            return Err(NoteGuardError::RuleLibrary(format!(
                "Rule '{}' has an empty pattern",
                definition.name
            )));
        }

        if !is_placeholder(&definition.placeholder) {
            return Err(NoteGuardError::RuleLibrary(format!(
                "Rule '{}' has placeholder {:?}; placeholders must look like \"[LABEL REDACTED]\"",
                definition.name, definition.placeholder
            )));
        }

        let mut flags = String::new();
        if definition.case_insensitive {
            flags.push('i');
        }
        if definition.multiline {
            flags.push('m');
        }
        let source = if flags.is_empty() {
            definition.pattern.clone()
        } else {
            format!("(?{flags}){}", definition.pattern)
        };

        let regex = fancy_regex::Regex::new(&source).map_err(|e| {
            NoteGuardError::RuleLibrary(format!(
                "Invalid regex in rule '{}': {}: {e}",
                definition.name, definition.pattern
            ))
        })?;

        Ok(Self {
            name: definition.name,
            category,
            pattern: definition.pattern,
            placeholder: definition.placeholder,
            case_insensitive: definition.case_insensitive,
            multiline: definition.multiline,
            regex,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> RuleCategory {
        self.category
    }

    /// Pattern as written, without the inline flag prefix
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub(crate) fn regex(&self) -> &fancy_regex::Regex {
        &self.regex
    }
}

/// Immutable, versioned table of redaction rules
#[derive(Debug, Clone)]
pub struct RuleTable {
    version: String,
    structured: Vec<RedactionRule>,
    clinical: Vec<RedactionRule>,
    contextual: Vec<RedactionRule>,
}

impl RuleTable {
    /// Build the table from the library embedded in the binary
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_LIBRARY)
    }

    /// Build a table from a TOML library file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            NoteGuardError::RuleLibrary(format!(
                "Failed to read rule library {}: {e}",
                path.display()
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Build a table from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: RuleLibrary = toml::from_str(content).map_err(|e| {
            NoteGuardError::RuleLibrary(format!("Failed to parse rule library TOML: {e}"))
        })?;

        if library.version.trim().is_empty() {
            return Err(NoteGuardError::RuleLibrary(
                "Rule library version cannot be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut compile_all = |category: RuleCategory, definitions: Vec<RuleDefinition>| {
            definitions
                .into_iter()
                .map(|definition| {
                    if !seen.insert(definition.name.clone()) {
                        return Err(NoteGuardError::RuleLibrary(format!(
                            "Duplicate rule name: {}",
                            definition.name
                        )));
                    }
                    RedactionRule::compile(category, definition)
                })
                .collect::<Result<Vec<_>>>()
        };

        let structured = compile_all(RuleCategory::Structured, library.structured)?;
        let clinical = compile_all(RuleCategory::Clinical, library.clinical)?;
        let contextual = compile_all(RuleCategory::Contextual, library.contextual)?;

        let table = Self {
            version: library.version,
            structured,
            clinical,
            contextual,
        };

        if table.is_empty() {
            return Err(NoteGuardError::RuleLibrary(
                "Rule library defines no rules".to_string(),
            ));
        }

        tracing::debug!(
            version = %table.version,
            structured = table.structured.len(),
            clinical = table.clinical.len(),
            contextual = table.contextual.len(),
            "Rule table compiled"
        );

        Ok(table)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Rules of one category, in declared order
    pub fn rules(&self, category: RuleCategory) -> &[RedactionRule] {
        match category {
            RuleCategory::Structured => &self.structured,
            RuleCategory::Clinical => &self.clinical,
            RuleCategory::Contextual => &self.contextual,
        }
    }

    /// Every rule in the order the local redactor applies them
    pub fn all_rules(&self) -> impl Iterator<Item = &RedactionRule> {
        RuleCategory::PASS_ORDER
            .into_iter()
            .flat_map(move |category| self.rules(category).iter())
    }

    /// Look up a rule by name
    pub fn get(&self, name: &str) -> Option<&RedactionRule> {
        self.all_rules().find(|rule| rule.name() == name)
    }

    pub fn len(&self) -> usize {
        self.structured.len() + self.clinical.len() + self.contextual.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_builtin_rules() {
        let table = RuleTable::builtin().unwrap();
        assert!(!table.rules(RuleCategory::Structured).is_empty());
        assert!(!table.rules(RuleCategory::Clinical).is_empty());
        assert!(!table.rules(RuleCategory::Contextual).is_empty());
        assert!(!table.version().is_empty());
    }

    #[test]
    fn test_builtin_declared_order_is_kept() {
        let table = RuleTable::builtin().unwrap();
        let structured: Vec<&str> = table
            .rules(RuleCategory::Structured)
            .iter()
            .map(|r| r.name())
            .collect();
        assert_eq!(structured.first(), Some(&"patient_id"));
        let ssn = structured.iter().position(|n| *n == "ssn").unwrap();
        let phone = structured.iter().position(|n| *n == "phone").unwrap();
        assert!(ssn < phone, "SSN must run before the broader phone rule");
    }

    #[test]
    fn test_all_rules_follow_pass_order() {
        let table = RuleTable::builtin().unwrap();
        let categories: Vec<RuleCategory> = table.all_rules().map(|r| r.category()).collect();
        let first_clinical = categories
            .iter()
            .position(|c| *c == RuleCategory::Clinical)
            .unwrap();
        let first_contextual = categories
            .iter()
            .position(|c| *c == RuleCategory::Contextual)
            .unwrap();
        assert!(categories[..first_clinical]
            .iter()
            .all(|c| *c == RuleCategory::Structured));
        assert!(categories[first_contextual..]
            .iter()
            .all(|c| *c == RuleCategory::Contextual));
        assert_eq!(categories.len(), table.len());
    }

    #[test]
    fn test_flags_are_explicit_per_rule() {
        let table = RuleTable::builtin().unwrap();
        assert!(table.get("ssn").unwrap().is_case_insensitive());
        assert!(!table.get("initials").unwrap().is_case_insensitive());
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        let toml = r#"
version = "test"

[[structured]]
name = "broken"
pattern = '(unclosed'
placeholder = "[BROKEN REDACTED]"
"#;
        let err = RuleTable::from_toml(toml).unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_placeholder_shape_is_enforced() {
        let toml = r#"
version = "test"

[[clinical]]
name = "bad_placeholder"
pattern = 'secret'
placeholder = "***"
"#;
        assert!(RuleTable::from_toml(toml).is_err());
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let toml = r#"
version = "test"

[[structured]]
name = "dup"
pattern = 'a'
placeholder = "[A REDACTED]"

[[contextual]]
name = "dup"
pattern = 'b'
placeholder = "[B REDACTED]"
"#;
        let err = RuleTable::from_toml(toml).unwrap_err();
        assert!(err.to_string().contains("Duplicate rule name"));
    }

    #[test]
    fn test_empty_library_is_rejected() {
        assert!(RuleTable::from_toml("version = \"empty\"").is_err());
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!(
            "Clinical".parse::<RuleCategory>().unwrap(),
            RuleCategory::Clinical
        );
        assert!("names".parse::<RuleCategory>().is_err());
    }
}
