// autoredact-core/src/headless.rs
//! One-shot helpers for callers that redact a single page and move on.
//!
//! Long-running callers should build a [`RedactionEngine`] once and reuse
//! it; these helpers compile the configuration on every call.

use crate::config::RuleConfiguration;
use crate::engine::{RedactionEngine, RedactionResult};
use crate::word_index::OcrWord;

/// Compiles `config` and runs a single redaction pass over `words`.
pub fn redact(words: &[OcrWord], config: &RuleConfiguration) -> RedactionResult {
    RedactionEngine::new(config).redact(words)
}

/// [`redact`] with the default configuration: every built-in detector and
/// the default allowlist.
pub fn redact_with_defaults(words: &[OcrWord]) -> RedactionResult {
    redact(words, &RuleConfiguration::default())
}
