//! Configuration management for `autoredact-core`.
//!
//! This module defines the rule configuration a detection pass runs with:
//! which built-in categories are enabled, the allowlist, user block words,
//! custom dates and custom regex rules, plus the engine tunables. It handles
//! YAML/JSON (de)serialization and provides helpers for loading, merging and
//! validating these configs.
//!
//! A `RuleConfiguration` is an immutable snapshot: every engine compiles its
//! own copy and nothing here is shared or mutated across calls.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::path::Path;

use crate::allowlist::DEFAULT_ALLOWLIST;

/// Maximum allowed length for a user-supplied regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// The fixed set of built-in detection categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinCategory {
    Email,
    IpAddress,
    CreditCard,
    Secret,
    GenericPii,
}

impl BuiltinCategory {
    pub const ALL: [BuiltinCategory; 5] = [
        BuiltinCategory::Email,
        BuiltinCategory::IpAddress,
        BuiltinCategory::CreditCard,
        BuiltinCategory::Secret,
        BuiltinCategory::GenericPii,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BuiltinCategory::Email => "email",
            BuiltinCategory::IpAddress => "ip_address",
            BuiltinCategory::CreditCard => "credit_card",
            BuiltinCategory::Secret => "secret",
            BuiltinCategory::GenericPii => "generic_pii",
        }
    }
}

impl fmt::Display for BuiltinCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-defined regular expression rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct CustomRegexRule {
    /// Stable identifier, unique within a configuration.
    pub id: String,
    /// The regex pattern string (Rust `regex` syntax).
    pub pattern: String,
    #[serde(default)]
    pub case_sensitive: bool,
    /// Human-readable name shown in reports.
    #[serde(default)]
    pub label: String,
}

/// Tunables of the detection and mapping pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Pixels added on each side of a redacted word box.
    pub padding: i32,
    /// Require the word and match texts to contain one another (in addition
    /// to overlapping spans) before a word is redacted for a match.
    pub require_text_containment: bool,
    /// Also accept a word whose text, with punctuation fused to its edges
    /// stripped, is contained in the match (`"123-4567,"` for `"(555) 123-4567"`).
    pub trim_word_punctuation: bool,
    /// Only report card numbers that pass the Luhn checksum.
    pub credit_card_luhn: bool,
    /// Minimum Shannon entropy (bits/char) for the secret token heuristic.
    pub secret_entropy_threshold: f64,
    /// Minimum length of a token considered by the secret heuristic.
    pub secret_min_length: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            padding: 2,
            require_text_containment: true,
            trim_word_punctuation: false,
            credit_card_luhn: true,
            secret_entropy_threshold: 3.5,
            secret_min_length: 20,
        }
    }
}

/// Top-level configuration of one detection pass.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RuleConfiguration {
    pub enabled_builtins: BTreeSet<BuiltinCategory>,
    /// Values that must never be redacted (matched case-insensitively, trimmed).
    pub allowlist: Vec<String>,
    /// Literal words to redact wherever they appear as whole words.
    pub block_words: Vec<String>,
    /// Concrete dates or date formats to redact.
    pub custom_dates: Vec<String>,
    pub custom_regex: Vec<CustomRegexRule>,
    pub engine: EngineSettings,
}

impl Default for RuleConfiguration {
    fn default() -> Self {
        Self {
            enabled_builtins: BuiltinCategory::ALL.into_iter().collect(),
            allowlist: DEFAULT_ALLOWLIST.iter().map(|s| s.to_string()).collect(),
            block_words: Vec::new(),
            custom_dates: Vec::new(),
            custom_regex: Vec::new(),
            engine: EngineSettings::default(),
        }
    }
}

/// A user configuration file. Every field is optional so that a file can
/// override just the parts it names; see [`merge_settings`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct UserConfiguration {
    pub enabled_builtins: Option<BTreeSet<BuiltinCategory>>,
    pub allowlist: Option<Vec<String>>,
    pub block_words: Option<Vec<String>>,
    pub custom_dates: Option<Vec<String>>,
    pub custom_regex: Option<Vec<CustomRegexRule>>,
    pub engine: Option<UserEngineSettings>,
}

/// Per-field overrides for [`EngineSettings`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct UserEngineSettings {
    pub padding: Option<i32>,
    pub require_text_containment: Option<bool>,
    pub trim_word_punctuation: Option<bool>,
    pub credit_card_luhn: Option<bool>,
    pub secret_entropy_threshold: Option<f64>,
    pub secret_min_length: Option<usize>,
}

impl RuleConfiguration {
    /// A configuration with no rules at all and an empty allowlist.
    pub fn empty() -> Self {
        Self {
            enabled_builtins: BTreeSet::new(),
            allowlist: Vec::new(),
            ..Self::default()
        }
    }

    /// Default configuration restricted to the given built-in categories.
    pub fn with_builtins(builtins: impl IntoIterator<Item = BuiltinCategory>) -> Self {
        Self {
            enabled_builtins: builtins.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn is_enabled(&self, category: BuiltinCategory) -> bool {
        self.enabled_builtins.contains(&category)
    }

    /// Loads a complete configuration from a YAML (or JSON) file.
    ///
    /// Fields missing from the file take their default values.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading rule configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: RuleConfiguration = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate()?;
        info!(
            "Loaded configuration from {}: {} built-ins, {} block words, {} dates, {} custom regex.",
            path.display(),
            config.enabled_builtins.len(),
            config.block_words.len(),
            config.custom_dates.len(),
            config.custom_regex.len()
        );
        Ok(config)
    }

    /// Checks the configuration shape.
    ///
    /// Regex syntax is deliberately not checked here: an uncompilable pattern
    /// only disables its own rule, with a warning, when the engine is built.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        let mut ids = HashSet::new();

        for rule in &self.custom_regex {
            if rule.id.trim().is_empty() {
                errors.push(format!("A custom regex rule (pattern '{}') has an empty `id`.", rule.pattern));
            } else if !ids.insert(rule.id.as_str()) {
                errors.push(format!("Duplicate custom regex id found: '{}'.", rule.id));
            }
            if rule.pattern.is_empty() {
                errors.push(format!("Custom regex '{}' has an empty `pattern`.", rule.id));
            }
            if rule.pattern.len() > MAX_PATTERN_LENGTH {
                errors.push(format!(
                    "Custom regex '{}': pattern length ({}) exceeds maximum allowed ({}).",
                    rule.id,
                    rule.pattern.len(),
                    MAX_PATTERN_LENGTH
                ));
            }
        }

        if self.engine.padding < 0 {
            errors.push(format!("engine.padding must not be negative (got {}).", self.engine.padding));
        }

        if self.block_words.iter().any(|w| w.trim().is_empty()) {
            warn!("Configuration contains empty block words; they will be ignored.");
        }
        if self.custom_dates.iter().any(|d| d.trim().is_empty()) {
            warn!("Configuration contains empty custom dates; they will be ignored.");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("Configuration validation failed:\n{}", errors.join("\n")))
        }
    }
}

impl UserConfiguration {
    /// Loads a partial configuration from a YAML (or JSON) file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading user settings from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))
    }
}

/// Overlays user settings on a default configuration.
///
/// Lists supplied by the user replace the defaults wholesale (a user
/// allowlist replaces the default allowlist), engine tunables override one
/// field at a time. The merged result is validated.
pub fn merge_settings(
    default_config: RuleConfiguration,
    user_config: Option<UserConfiguration>,
) -> Result<RuleConfiguration> {
    let mut merged = default_config;

    if let Some(user) = user_config {
        debug!("Merging user settings into defaults.");
        if let Some(builtins) = user.enabled_builtins {
            merged.enabled_builtins = builtins;
        }
        if let Some(allowlist) = user.allowlist {
            debug!("User allowlist replaces defaults ({} entries).", allowlist.len());
            merged.allowlist = allowlist;
        }
        if let Some(block_words) = user.block_words {
            merged.block_words = block_words;
        }
        if let Some(custom_dates) = user.custom_dates {
            merged.custom_dates = custom_dates;
        }
        if let Some(custom_regex) = user.custom_regex {
            merged.custom_regex = custom_regex;
        }
        if let Some(engine) = user.engine {
            let target = &mut merged.engine;
            if let Some(v) = engine.padding {
                target.padding = v;
            }
            if let Some(v) = engine.require_text_containment {
                target.require_text_containment = v;
            }
            if let Some(v) = engine.trim_word_punctuation {
                target.trim_word_punctuation = v;
            }
            if let Some(v) = engine.credit_card_luhn {
                target.credit_card_luhn = v;
            }
            if let Some(v) = engine.secret_entropy_threshold {
                debug!("Overriding secret entropy threshold with user value: {}", v);
                target.secret_entropy_threshold = v;
            }
            if let Some(v) = engine.secret_min_length {
                target.secret_min_length = v;
            }
        }
    }

    merged.validate()?;
    Ok(merged)
}
