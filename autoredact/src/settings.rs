// autoredact/src/settings.rs
//! Resolves the rule configuration a command runs with.
//!
//! Precedence, lowest first: built-in defaults, the user settings file
//! (`--config`, `AUTOREDACT_CONFIG`, or `<config dir>/autoredact/config.yaml`
//! when present), then command-line flags.

use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};

use autoredact_core::config::{self, BuiltinCategory, CustomRegexRule, RuleConfiguration, UserConfiguration};

use crate::cli::RuleArgs;

const APP_DIR: &str = "autoredact";
const CONFIG_FILE: &str = "config.yaml";

/// `<config dir>/autoredact/config.yaml`, if a config directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

fn load_user_settings(explicit: Option<&Path>) -> Result<Option<UserConfiguration>> {
    if let Some(path) = explicit {
        let user = UserConfiguration::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?;
        return Ok(Some(user));
    }
    match default_config_path() {
        Some(path) if path.is_file() => {
            debug!("Using settings file {}", path.display());
            Ok(Some(UserConfiguration::load_from_file(&path)?))
        }
        _ => Ok(None),
    }
}

/// Turns `--custom-regex` values into rules named after their position.
pub fn cli_regex_rules(patterns: &[String]) -> Vec<CustomRegexRule> {
    patterns
        .iter()
        .enumerate()
        .map(|(i, pattern)| CustomRegexRule {
            id: format!("cli-{}", i),
            pattern: pattern.clone(),
            case_sensitive: false,
            label: format!("Custom Rule {}", i + 1),
        })
        .collect()
}

/// Applies command-line rule overrides to a configuration.
pub fn apply_rule_args(mut config: RuleConfiguration, args: &RuleArgs) -> RuleConfiguration {
    let disabled = [
        (args.no_emails, BuiltinCategory::Email),
        (args.no_ips, BuiltinCategory::IpAddress),
        (args.no_credit_cards, BuiltinCategory::CreditCard),
        (args.no_secrets, BuiltinCategory::Secret),
        (args.no_pii, BuiltinCategory::GenericPii),
    ];
    for (off, category) in disabled {
        if off {
            config.enabled_builtins.remove(&category);
        }
    }

    if let Some(allowlist) = &args.allowlist {
        debug!("--allowlist replaces the configured allowlist ({} entries).", allowlist.len());
        config.allowlist = allowlist.clone();
    }
    config.block_words.extend(args.block_words.iter().cloned());
    config.custom_dates.extend(args.custom_dates.iter().cloned());
    config.custom_regex.extend(cli_regex_rules(&args.custom_regex));
    config
}

/// Builds the validated configuration for one command invocation.
pub fn resolve_config(config_path: Option<&Path>, args: &RuleArgs) -> Result<RuleConfiguration> {
    let user = load_user_settings(config_path)?;
    let merged = config::merge_settings(RuleConfiguration::default(), user)?;
    let resolved = apply_rule_args(merged, args);
    resolved.validate().context("Invalid rule configuration")?;
    info!(
        "Resolved configuration: {} built-ins, {} allowlist entries, {} custom regex.",
        resolved.enabled_builtins.len(),
        resolved.allowlist.len(),
        resolved.custom_regex.len()
    );
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn flags_disable_builtins_and_extend_lists() {
        let args = RuleArgs {
            no_emails: true,
            no_secrets: true,
            block_words: vec!["Falcon".into()],
            custom_regex: vec![r"EMP-\d+".into(), r"TCK-\d+".into()],
            ..Default::default()
        };
        let config = apply_rule_args(RuleConfiguration::default(), &args);
        assert!(!config.is_enabled(BuiltinCategory::Email));
        assert!(!config.is_enabled(BuiltinCategory::Secret));
        assert!(config.is_enabled(BuiltinCategory::IpAddress));
        assert_eq!(config.block_words, vec!["Falcon".to_string()]);
        assert_eq!(config.custom_regex[1].id, "cli-1");
        assert_eq!(config.custom_regex[1].label, "Custom Rule 2");
        assert!(!config.custom_regex[0].case_sensitive);
    }

    #[test]
    fn allowlist_flag_replaces_defaults() {
        let args = RuleArgs {
            allowlist: Some(vec!["ops@corp.io".into()]),
            ..Default::default()
        };
        let config = apply_rule_args(RuleConfiguration::default(), &args);
        assert_eq!(config.allowlist, vec!["ops@corp.io".to_string()]);
    }

    #[test]
    fn explicit_file_is_merged_then_overridden() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "block_words: [\"Orion\"]\nengine:\n  padding: 6").unwrap();
        let args = RuleArgs {
            block_words: vec!["Vega".into()],
            ..Default::default()
        };
        let config = resolve_config(Some(file.path()), &args).unwrap();
        assert_eq!(config.block_words, vec!["Orion".to_string(), "Vega".to_string()]);
        assert_eq!(config.engine.padding, 6);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = resolve_config(Some(Path::new("/no/such/autoredact.yaml")), &RuleArgs::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("/no/such/autoredact.yaml"));
    }
}
