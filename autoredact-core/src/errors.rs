//! errors.rs - Error and warning types for the autoredact-core library.
//!
//! Hard failures are represented by [`AutoRedactError`]. Problems that must not
//! abort a detection pass (a user regex that does not compile, a custom date
//! that cannot be understood) are reported as [`RuleWarning`]s instead.
//!
//! License: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// All error types surfaced by `autoredact-core`.
///
/// `#[non_exhaustive]` so that new variants are not a breaking change.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AutoRedactError {
    #[error("Failed to compile detection rule '{0}': {1}")]
    RuleCompilation(String, regex::Error),

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Custom date '{0}' is neither a recognizable date nor a date format")]
    InvalidDateFormat(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("An unexpected I/O error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),
}

/// A non-fatal problem found while compiling a rule configuration.
///
/// The offending rule is skipped; every other rule still runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleWarning {
    /// Identifier of the skipped rule (e.g. `custom_regex:cli-0`).
    pub rule_id: String,
    pub message: String,
}

impl RuleWarning {
    pub fn from_error(rule_id: impl Into<String>, err: &AutoRedactError) -> Self {
        Self {
            rule_id: rule_id.into(),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for RuleWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "skipped rule '{}': {}", self.rule_id, self.message)
    }
}
