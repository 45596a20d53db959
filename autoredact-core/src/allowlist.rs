// autoredact-core/src/allowlist.rs
//! Allowlist exception layer.
//!
//! A match is exempt only when its whole text equals an allowlisted value
//! (trimmed, case-insensitive). `192.168.1.100` is not exempted by an entry
//! `192.168.1.1`.

use log::debug;
use std::collections::HashSet;

use crate::redaction_match::{log_dropped_match_debug, Match};

/// Commonly shared, non-sensitive addresses left visible by default.
pub const DEFAULT_ALLOWLIST: &[&str] = &[
    // Localhost / loopback
    "127.0.0.1",
    "localhost",
    "0.0.0.0",
    "::1",
    // Typical private gateways
    "192.168.0.1",
    "192.168.1.1",
    "10.0.0.1",
    // Public DNS resolvers
    "8.8.8.8",
    "8.8.4.4",
    "1.1.1.1",
    "1.0.0.1",
];

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Normalized, read-only set of exempt values.
#[derive(Debug, Clone, Default)]
pub struct AllowlistSet {
    entries: HashSet<String>,
}

impl AllowlistSet {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries: HashSet<String> = values
            .into_iter()
            .map(|v| normalize(v.as_ref()))
            .filter(|v| !v.is_empty())
            .collect();
        debug!("Allowlist built with {} entries.", entries.len());
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, text: &str) -> bool {
        !self.entries.is_empty() && self.entries.contains(&normalize(text))
    }

    /// Drops every match whose text is allowlisted, keeping the rest in order.
    pub fn filter(&self, matches: Vec<Match>) -> Vec<Match> {
        if self.entries.is_empty() {
            return matches;
        }
        matches
            .into_iter()
            .filter(|m| {
                let allowed = self.contains(&m.text);
                if allowed {
                    log_dropped_match_debug(module_path!(), m, "allowlisted");
                }
                !allowed
            })
            .collect()
    }
}
