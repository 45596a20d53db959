// autoredact-core/src/detectors/mod.rs
//! Pattern detectors that run over the reconstructed text blob.
//!
//! Every rule in a [`RuleConfiguration`] becomes one [`Detector`]. Detectors
//! are independent: each scans the full text with a fresh iterator, so
//! matches from different rules may overlap. Overlaps are resolved later, at
//! the region level.
//!
//! Compilation never aborts a pass. A rule that cannot be compiled (bad user
//! regex, unreadable custom date) is dropped and reported as a
//! [`RuleWarning`].
//!
//! License: MIT OR Apache-2.0

pub mod block_words;
pub mod builtin;
pub mod custom_regex;
pub mod dates;

use log::{debug, warn};
use regex::Regex;
use std::collections::HashSet;
use std::fmt;

use crate::config::{BuiltinCategory, CustomRegexRule, EngineSettings, RuleConfiguration};
use crate::errors::{AutoRedactError, RuleWarning};
use crate::redaction_match::{log_match_debug, Category, Match};

use self::block_words::BlockWordDetector;
use self::builtin::BuiltinDetector;
use self::custom_regex::CustomRegexDetector;
use self::dates::DateDetector;

/// One configured detection rule. Pure configuration, no state.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionRule {
    Builtin(BuiltinCategory),
    BlockWord(String),
    CustomDate(String),
    CustomRegex(CustomRegexRule),
}

impl DetectionRule {
    /// Stable identifier used in logs, warnings and match provenance.
    pub fn id(&self) -> String {
        match self {
            DetectionRule::Builtin(category) => format!("builtin:{}", category),
            DetectionRule::BlockWord(word) => format!("block_word:{}", word.trim()),
            DetectionRule::CustomDate(date) => format!("custom_date:{}", date.trim()),
            DetectionRule::CustomRegex(rule) => format!("custom_regex:{}", rule.id),
        }
    }

    /// Expands a configuration into its rules, in a fixed order: built-ins,
    /// block words, custom dates, custom regex. Blank block words and dates
    /// are left out.
    pub fn from_config(config: &RuleConfiguration) -> Vec<DetectionRule> {
        let builtins = config
            .enabled_builtins
            .iter()
            .map(|c| DetectionRule::Builtin(*c));
        let block_words = config
            .block_words
            .iter()
            .filter(|w| !w.trim().is_empty())
            .map(|w| DetectionRule::BlockWord(w.clone()));
        let dates = config
            .custom_dates
            .iter()
            .filter(|d| !d.trim().is_empty())
            .map(|d| DetectionRule::CustomDate(d.clone()));
        let regexes = config
            .custom_regex
            .iter()
            .map(|r| DetectionRule::CustomRegex(r.clone()));

        builtins.chain(block_words).chain(dates).chain(regexes).collect()
    }
}

/// A compiled rule, ready to scan text.
pub trait Detector: Send + Sync + fmt::Debug {
    fn rule_id(&self) -> &str;

    fn category(&self) -> Category;

    /// All matches in `text`, leftmost-first and non-overlapping per pattern.
    fn detect(&self, text: &str) -> Vec<Match>;
}

/// Compiles a single rule into its detector.
pub fn compile_rule(
    rule: &DetectionRule,
    settings: &EngineSettings,
) -> Result<Box<dyn Detector>, AutoRedactError> {
    let rule_id = rule.id();
    let detector: Box<dyn Detector> = match rule {
        DetectionRule::Builtin(category) => Box::new(BuiltinDetector::new(*category, settings)),
        DetectionRule::BlockWord(word) => Box::new(BlockWordDetector::new(word, rule_id)?),
        DetectionRule::CustomDate(date) => Box::new(DateDetector::new(date, rule_id)?),
        DetectionRule::CustomRegex(custom) => Box::new(CustomRegexDetector::new(custom, rule_id)?),
    };
    Ok(detector)
}

/// Applies one rule to `text`. Convenience for callers that do not keep a
/// compiled [`DetectorSet`] around.
pub fn detect(
    rule: &DetectionRule,
    text: &str,
    settings: &EngineSettings,
) -> Result<Vec<Match>, AutoRedactError> {
    Ok(compile_rule(rule, settings)?.detect(text))
}

/// Runs `regex` over the whole text, skipping empty matches, which cannot
/// be mapped to anything worth redacting.
pub(crate) fn find_all(regex: &Regex, text: &str, category: Category, rule_id: &str) -> Vec<Match> {
    regex
        .find_iter(text)
        .filter(|m| !m.is_empty())
        .map(|m| Match::new(m.as_str(), category, m.start(), m.end(), rule_id))
        .collect()
}

/// The compiled collection of every rule in a configuration.
#[derive(Debug, Default)]
pub struct DetectorSet {
    detectors: Vec<Box<dyn Detector>>,
    warnings: Vec<RuleWarning>,
}

impl DetectorSet {
    /// Compiles every rule of `config`. Rules that fail to compile are
    /// skipped and recorded as warnings.
    pub fn compile(config: &RuleConfiguration) -> Self {
        let rules = DetectionRule::from_config(config);
        debug!("Compiling {} detection rules.", rules.len());

        let mut detectors = Vec::with_capacity(rules.len());
        let mut warnings = Vec::new();

        for rule in &rules {
            match compile_rule(rule, &config.engine) {
                Ok(detector) => detectors.push(detector),
                Err(e) => {
                    let warning = RuleWarning::from_error(rule.id(), &e);
                    warn!("Skipping rule '{}': {}", warning.rule_id, e);
                    warnings.push(warning);
                }
            }
        }

        debug!(
            "Finished compiling rules. Active: {}, skipped: {}.",
            detectors.len(),
            warnings.len()
        );
        Self { detectors, warnings }
    }

    pub fn warnings(&self) -> &[RuleWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// Runs every detector over `text` and concatenates their matches in
    /// rule order.
    ///
    /// Custom dates are de-duplicated across all configured dates on
    /// `(start, text)`: several date entries often expand to the same
    /// concrete pattern and the same hit must only count once.
    pub fn detect(&self, text: &str) -> Vec<Match> {
        let mut all = Vec::new();
        let mut seen_dates: HashSet<(usize, String)> = HashSet::new();

        for detector in &self.detectors {
            for m in detector.detect(text) {
                if m.category == Category::CustomDate && !seen_dates.insert((m.start, m.text.clone())) {
                    continue;
                }
                log_match_debug(module_path!(), &m);
                all.push(m);
            }
        }
        all
    }
}
