//! Rules command implementation
//!
//! Lists the rules of the active library in the order they run.

use crate::config::load_config_or_default;
use crate::redaction::{RedactionRule, RuleCategory, RuleTable};
use clap::Args;

/// Arguments for the rules command
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Only list one category (structured, clinical, contextual)
    #[arg(long)]
    pub category: Option<String>,
}

impl RulesArgs {
    /// Execute the rules command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let categories = match self.selected_categories() {
            Ok(categories) => categories,
            Err(e) => {
                println!("❌ {e}");
                return Ok(2);
            }
        };

        let table = match config.redaction.rule_library {
            Some(ref path) => RuleTable::from_file(path),
            None => RuleTable::builtin(),
        };
        let table = match table {
            Ok(table) => table,
            Err(e) => {
                println!("❌ Failed to load rule library");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!(
            "📋 Rule library {} ({} rules, {})",
            table.version(),
            table.len(),
            config
                .redaction
                .rule_library
                .as_deref()
                .unwrap_or("built-in")
        );

        for category in categories {
            let rules = table.rules(category);
            println!();
            println!("{} ({}):", category, rules.len());
            for rule in rules {
                println!(
                    "  {:<22} {:<28} {}",
                    rule.name(),
                    rule.placeholder(),
                    rule_flags(rule)
                );
            }
        }

        Ok(0)
    }

    fn selected_categories(&self) -> crate::domain::Result<Vec<RuleCategory>> {
        match self.category {
            Some(ref name) => Ok(vec![name.parse()?]),
            None => Ok(RuleCategory::PASS_ORDER.to_vec()),
        }
    }
}

/// Inline regex flags applied to a rule, e.g. `(?im)`
fn rule_flags(rule: &RedactionRule) -> String {
    let mut flags = String::new();
    if rule.is_case_insensitive() {
        flags.push('i');
    }
    if rule.is_multiline() {
        flags.push('m');
    }
    if flags.is_empty() {
        String::new()
    } else {
        format!("(?{flags})")
    }
}
