// autoredact-core/tests/redaction_properties.rs
//! End-to-end properties of a redaction pass.

use std::collections::HashSet;

use autoredact_core::{
    headless, BoundingBox, BuiltinCategory, Category, CustomRegexRule, DetectionBreakdown,
    DetectionRule, OcrWord, OverlapMapper, RedactionEngine, Region, RuleConfiguration, WordIndex,
};

/// Lays words out left to right on one line, 10px per character.
fn line(y: i32, words: &[&str]) -> Vec<OcrWord> {
    let mut x = 10;
    words
        .iter()
        .map(|w| {
            let width = 10 * w.chars().count() as i32;
            let word = OcrWord::new(*w, BoundingBox::new(x, y, x + width, y + 20));
            x += width + 12;
            word
        })
        .collect()
}

fn custom(id: &str, pattern: &str) -> CustomRegexRule {
    CustomRegexRule {
        id: id.to_string(),
        pattern: pattern.to_string(),
        case_sensitive: false,
        label: id.to_string(),
    }
}

#[test_log::test]
fn redact_is_idempotent() {
    let mut words = line(0, &["Mail", "ops@corp.io", "from", "10.0.4.2", "card", "4111-1111-1111-1111"]);
    words.extend(line(40, &["SSN", "123-45-6789", "token", "Zx8Kq2Lm9Vb4Nw7Rt1Yp3Hs6"]));
    let engine = RedactionEngine::new(&RuleConfiguration::default());

    let first = engine.redact(&words);
    let second = engine.redact(&words);

    let as_set = |regions: &[Region]| regions.iter().copied().collect::<HashSet<_>>();
    assert_eq!(as_set(&first.regions), as_set(&second.regions));
    assert_eq!(first.breakdown, second.breakdown);
    assert_eq!(first.breakdown.emails, 1);
    assert_eq!(first.breakdown.ips, 1);
    assert_eq!(first.breakdown.credit_cards, 1);
    assert_eq!(first.breakdown.secrets, 1);
    assert_eq!(first.breakdown.pii, 1);
}

#[test]
fn allowlisted_ip_is_left_alone() {
    let words = vec![OcrWord::new("8.8.8.8", BoundingBox::new(100, 50, 170, 70))];
    let config = RuleConfiguration::with_builtins([BuiltinCategory::IpAddress]);

    let result = headless::redact(&words, &config);
    assert_eq!(result.breakdown.ips, 0);
    assert!(result.regions.is_empty());

    let mut without_entry = config.clone();
    without_entry.allowlist.retain(|a| a != "8.8.8.8");
    let result = headless::redact(&words, &without_entry);
    assert_eq!(result.breakdown.ips, 1);
    assert_eq!(result.regions, vec![Region::new(98, 48, 172, 72)]);
}

#[test]
fn allowlist_is_whole_match_equality() {
    let words = line(0, &["gateway", "192.168.1.100"]);
    let mut config = RuleConfiguration::with_builtins([BuiltinCategory::IpAddress]);
    config.allowlist = vec!["192.168.1.1".into()];
    assert_eq!(headless::redact(&words, &config).breakdown.ips, 1);
}

#[test]
fn credit_cards_respect_luhn() {
    let config = RuleConfiguration::with_builtins([BuiltinCategory::CreditCard]);

    let valid = headless::redact(&line(0, &["4111111111111111"]), &config);
    assert_eq!(valid.breakdown.credit_cards, 1);
    assert_eq!(valid.detections[0].category, Category::CreditCard);

    let invalid = headless::redact(&line(0, &["4111111111111112"]), &config);
    assert_eq!(invalid.breakdown.credit_cards, 0);
    assert!(invalid.regions.is_empty());
}

#[test]
fn block_words_are_literal() {
    let mut config = RuleConfiguration::empty();
    config.block_words = vec!["a.b".into()];

    let hit = headless::redact(&line(0, &["see", "a.b", "now"]), &config);
    assert_eq!(hit.breakdown.pii, 1);
    assert_eq!(hit.regions.len(), 1);

    let miss = headless::redact(&line(0, &["see", "axb", "now"]), &config);
    assert_eq!(miss.breakdown.total(), 0);
}

#[test_log::test]
fn broken_custom_regex_does_not_disable_others() {
    let mut config = RuleConfiguration::empty();
    config.custom_regex = vec![custom("broken", "(unclosed"), custom("ticket", r"TCK-\d{4}")];
    let engine = RedactionEngine::new(&config);

    assert_eq!(engine.warnings().len(), 1);
    assert_eq!(engine.warnings()[0].rule_id, "custom_regex:broken");

    let result = engine.redact(&line(0, &["ref", "tck-0042"]));
    assert_eq!(result.breakdown.pii, 1);
    assert_eq!(result.detections[0].rule_id, "custom_regex:ticket");
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn email_maps_to_second_word_only() {
    let words = vec![
        OcrWord::new("john", BoundingBox::new(0, 0, 40, 20)),
        OcrWord::new("doe@example.com", BoundingBox::new(50, 0, 200, 20)),
    ];
    let index = WordIndex::build(&words);
    assert_eq!(index.text_blob(), "john doe@example.com");

    let rule = DetectionRule::Builtin(BuiltinCategory::Email);
    let matches = autoredact_core::detectors::detect(&rule, index.text_blob(), &Default::default()).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!((matches[0].start, matches[0].end), (5, 20));

    let mapped = OverlapMapper::default().map(&matches[0], &index);
    assert_eq!(mapped.len(), 1);
    assert_eq!(mapped[0].text, "doe@example.com");

    let config = RuleConfiguration::with_builtins([BuiltinCategory::Email]);
    let result = headless::redact(&words, &config);
    assert_eq!(result.regions, vec![Region::new(48, -2, 202, 22)]);
}

#[test]
fn overlapping_regions_merge_but_counts_do_not() {
    // Two block words whose boxes overlap on the page.
    let words = vec![
        OcrWord::new("alpha", BoundingBox::new(0, 0, 50, 20)),
        OcrWord::new("beta", BoundingBox::new(45, 5, 90, 25)),
    ];
    let mut config = RuleConfiguration::empty();
    config.block_words = vec!["alpha".into(), "beta".into()];

    let result = headless::redact(&words, &config);
    assert_eq!(result.regions, vec![Region::new(-2, -2, 92, 27)]);
    assert_eq!(result.breakdown.pii, 2);
    assert_eq!(result.detections.len(), 2);
}

#[test]
fn empty_input_is_not_an_error() {
    for config in [RuleConfiguration::default(), RuleConfiguration::empty()] {
        let result = headless::redact(&[], &config);
        assert!(result.regions.is_empty());
        assert_eq!(result.breakdown, DetectionBreakdown::default());
    }
}

#[test]
fn blank_words_do_not_shift_spans() {
    let words = vec![
        OcrWord::new("  ", BoundingBox::new(0, 0, 5, 20)),
        OcrWord::new("ops@corp.io", BoundingBox::new(10, 0, 120, 20)),
    ];
    let index = WordIndex::build(&words);
    assert_eq!(index.text_blob(), "ops@corp.io");
    assert_eq!(headless::redact_with_defaults(&words).breakdown.emails, 1);
}

/// Words are joined with one space regardless of line breaks, so a pattern
/// can run from the end of one line into the start of the next.
#[test]
fn patterns_can_cross_line_breaks() {
    let mut words = line(0, &["Invoice", "for", "John"]);
    words.extend(line(40, &["Smith", "attached"]));
    let mut config = RuleConfiguration::empty();
    config.block_words = vec!["John Smith".into()];

    let result = headless::redact(&words, &config);
    assert_eq!(result.breakdown.pii, 1);
    // One box on each line; they do not overlap so they stay separate.
    assert_eq!(result.regions.len(), 2);
    assert!(result.regions.iter().any(|r| r.y0 == -2));
    assert!(result.regions.iter().any(|r| r.y0 == 38));
}

#[test]
fn custom_dates_count_once_across_entries() {
    let mut config = RuleConfiguration::empty();
    config.custom_dates = vec!["2024-01-15".into(), "DD/MM/YYYY".into(), "15 January 2024".into()];

    let result = headless::redact(&line(0, &["Signed", "15/01/2024", "and", "2024-01-15"]), &config);
    assert_eq!(result.breakdown.pii, 2);
    assert!(result.warnings.is_empty());
}

#[test]
fn disabled_builtins_find_nothing() {
    let mut config = RuleConfiguration::default();
    config.enabled_builtins.clear();
    let result = headless::redact(&line(0, &["ops@corp.io", "10.1.1.7"]), &config);
    assert_eq!(result.breakdown.total(), 0);
}

#[test]
fn labelled_secret_redacts_only_the_value() {
    let words = line(0, &["Secret:", "hunter2secret"]);
    let config = RuleConfiguration::with_builtins([BuiltinCategory::Secret]);
    let result = headless::redact(&words, &config);
    assert_eq!(result.breakdown.secrets, 1);
    assert_eq!(result.regions, vec![Region::new(90, -2, 224, 22)]);
}

#[test]
fn card_next_to_other_numbers_is_found() {
    let config = RuleConfiguration::with_builtins([BuiltinCategory::CreditCard]);

    let with_expiry = headless::redact(&line(0, &["Card", "4111111111111111", "12/25"]), &config);
    assert_eq!(with_expiry.breakdown.credit_cards, 1);
    assert_eq!(with_expiry.regions, vec![Region::new(60, -2, 224, 22)]);

    let with_quantity = headless::redact(&line(0, &["Qty", "2", "4111111111111111"]), &config);
    assert_eq!(with_quantity.breakdown.credit_cards, 1);
    assert_eq!(with_quantity.regions.len(), 1);
}

#[test]
fn fused_punctuation_words_follow_the_trim_setting() {
    let words = line(0, &["call", "(555)", "123-4567,"]);
    let mut config = RuleConfiguration::with_builtins([BuiltinCategory::GenericPii]);

    let strict = headless::redact(&words, &config);
    assert_eq!(strict.breakdown.pii, 1);
    assert_eq!(strict.regions, vec![Region::new(60, -2, 114, 22)]);

    config.engine.trim_word_punctuation = true;
    let trimming = headless::redact(&words, &config);
    assert_eq!(trimming.breakdown.pii, 1);
    assert_eq!(
        trimming.regions,
        vec![Region::new(60, -2, 114, 22), Region::new(122, -2, 216, 22)]
    );
}

#[test]
fn bare_double_colons_are_not_addresses() {
    let config = RuleConfiguration::with_builtins([BuiltinCategory::IpAddress]);
    assert_eq!(headless::redact(&line(0, &["C++", "scope", "::", "operator"]), &config).breakdown.ips, 0);
    assert_eq!(headless::redact(&line(0, &["step", "1::", "done"]), &config).breakdown.ips, 0);
}
