//! custom_regex.rs - Compilation of user-supplied regular expressions.
//!
//! Patterns are compiled with a bounded program size and a bounded source
//! length, so a single hostile rule cannot blow up memory. A pattern that
//! fails either check is reported to the caller, who turns it into a
//! [`RuleWarning`](crate::errors::RuleWarning) and keeps going.
//!
//! License: MIT OR Apache-2.0

use log::debug;
use regex::{Regex, RegexBuilder};

use super::{find_all, Detector};
use crate::config::{CustomRegexRule, MAX_PATTERN_LENGTH};
use crate::errors::AutoRedactError;
use crate::redaction_match::{Category, Match};

/// Upper bound on the compiled program size of a user regex.
pub const COMPILED_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Compiles one user pattern. Matching is case-insensitive unless the rule
/// asks otherwise.
pub fn compile_pattern(
    rule_id: &str,
    pattern: &str,
    case_sensitive: bool,
) -> Result<Regex, AutoRedactError> {
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(AutoRedactError::PatternLengthExceeded(
            rule_id.to_string(),
            pattern.len(),
            MAX_PATTERN_LENGTH,
        ));
    }

    RegexBuilder::new(pattern)
        .case_insensitive(!case_sensitive)
        .size_limit(COMPILED_SIZE_LIMIT)
        .build()
        .map_err(|e| AutoRedactError::RuleCompilation(rule_id.to_string(), e))
}

#[derive(Debug)]
pub struct CustomRegexDetector {
    rule_id: String,
    label: String,
    regex: Regex,
}

impl CustomRegexDetector {
    pub fn new(rule: &CustomRegexRule, rule_id: String) -> Result<Self, AutoRedactError> {
        debug!("Attempting to compile rule: '{}' with pattern '{:?}'", rule_id, rule.pattern);
        let regex = compile_pattern(&rule_id, &rule.pattern, rule.case_sensitive)?;
        debug!("Rule '{}' compiled successfully.", rule_id);
        Ok(Self {
            rule_id,
            label: rule.label.clone(),
            regex,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Detector for CustomRegexDetector {
    fn rule_id(&self) -> &str {
        &self.rule_id
    }

    fn category(&self) -> Category {
        Category::CustomRegex
    }

    fn detect(&self, text: &str) -> Vec<Match> {
        find_all(&self.regex, text, Category::CustomRegex, &self.rule_id)
    }
}
