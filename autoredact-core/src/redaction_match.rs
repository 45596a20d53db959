// autoredact-core/src/redaction_match.rs
//! Match types produced by detectors, plus PII-safe logging helpers.

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    /// Whether matched text may appear verbatim in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("AUTOREDACT_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// What kind of rule produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Email,
    IpAddress,
    CreditCard,
    Secret,
    GenericPii,
    BlockWord,
    CustomDate,
    CustomRegex,
}

impl Category {
    /// The user-facing statistics bucket this category is counted under.
    /// User-defined rules have no more specific home than `pii`.
    pub fn bucket(self) -> ReportBucket {
        match self {
            Category::Email => ReportBucket::Emails,
            Category::IpAddress => ReportBucket::Ips,
            Category::CreditCard => ReportBucket::CreditCards,
            Category::Secret => ReportBucket::Secrets,
            Category::GenericPii
            | Category::BlockWord
            | Category::CustomDate
            | Category::CustomRegex => ReportBucket::Pii,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Email => "email",
            Category::IpAddress => "ip_address",
            Category::CreditCard => "credit_card",
            Category::Secret => "secret",
            Category::GenericPii => "generic_pii",
            Category::BlockWord => "block_word",
            Category::CustomDate => "custom_date",
            Category::CustomRegex => "custom_regex",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five reporting buckets of a [`DetectionBreakdown`](crate::regions::DetectionBreakdown).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportBucket {
    Emails,
    Ips,
    CreditCards,
    Secrets,
    Pii,
}

/// A character-span hit in the reconstructed text blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub text: String,
    pub category: Category,
    /// Byte offset of the first matched byte.
    pub start: usize,
    /// Byte offset one past the last matched byte.
    pub end: usize,
    /// Identifier of the rule that produced the match (e.g. `builtin:email`).
    pub rule_id: String,
}

impl Match {
    pub fn new(text: &str, category: Category, start: usize, end: usize, rule_id: &str) -> Self {
        Self {
            text: text.to_string(),
            category,
            start,
            end,
            rule_id: rule_id.to_string(),
        }
    }
}

/// Masks sensitive content for display or logging.
pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

/// Returns the content verbatim only when PII debugging was explicitly allowed.
pub fn loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_match_debug(module_path: &str, m: &Match) {
    debug!(
        "{} Found match: rule='{}', category='{}', span={}..{}, text='{}'",
        module_path,
        m.rule_id,
        m.category,
        m.start,
        m.end,
        loggable_content(&m.text)
    );
}

pub fn log_dropped_match_debug(module_path: &str, m: &Match, reason: &str) {
    debug!(
        "{} Dropped match for rule '{}' ({}): '{}'",
        module_path,
        m.rule_id,
        reason,
        loggable_content(&m.text)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_sensitive_short_string() {
        assert_eq!(redact_sensitive("abc"), "[REDACTED]".to_string());
    }

    #[test]
    fn test_redact_sensitive_long_string() {
        assert_eq!(redact_sensitive("123456789"), "[REDACTED: 9 chars]".to_string());
    }

    #[test]
    fn user_rules_report_under_pii() {
        assert_eq!(Category::BlockWord.bucket(), ReportBucket::Pii);
        assert_eq!(Category::CustomDate.bucket(), ReportBucket::Pii);
        assert_eq!(Category::CustomRegex.bucket(), ReportBucket::Pii);
        assert_eq!(Category::GenericPii.bucket(), ReportBucket::Pii);
        assert_eq!(Category::CreditCard.bucket(), ReportBucket::CreditCards);
    }
}
