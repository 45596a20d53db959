// autoredact-core/src/detectors/builtin.rs
//! Built-in detectors: emails, IP addresses, credit cards, secrets and
//! generic PII (phone numbers, US SSNs, UK National Insurance numbers).
//!
//! Patterns here favour recall on OCR text; structural validators from
//! [`crate::validators`] then prune candidates that cannot be genuine.
//!
//! License: MIT OR Apache-2.0

use autoredact_entropy::SecretScorer;
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Reverse;
use std::net::Ipv6Addr;

use super::{find_all, Detector};
use crate::config::{BuiltinCategory, EngineSettings};
use crate::redaction_match::{log_dropped_match_debug, Category, Match};
use crate::validators::{is_valid_credit_card, is_valid_ssn, is_valid_uk_nino};

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}\b").expect("email pattern")
});

static IPV4: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\b",
    )
    .expect("ipv4 pattern")
});

/// Loose IPv6 shape; every candidate is confirmed with [`Ipv6Addr`].
static IPV6_CANDIDATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[0-9a-f]{0,4}(?::[0-9a-f]{0,4}){2,7}").expect("ipv6 pattern"));

/// Fewer hex digits than this is punctuation (`::`, `1::`), not an address.
const IPV6_MIN_HEX_DIGITS: usize = 2;

static CREDIT_CARD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d(?:[ \-]?\d){12,18}\b").expect("credit card pattern"));

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+\d{1,3}[\s.\-]?)?(?:\(\d{3}\)|\b\d{3})[\s.\-]?\d{3}[\s.\-]\d{4}\b").expect("phone pattern")
});

static SSN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{3}[\- ]\d{2}[\- ]\d{4}\b").expect("ssn pattern"));

static UK_NINO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b[a-z]{2}\s?\d{2}\s?\d{2}\s?\d{2}\s?[a-d]\b").expect("nino pattern")
});

/// Candidate tokens for the entropy heuristic. Length is enforced by the scorer.
static SECRET_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9+/_\-]{8,}={0,2}").expect("secret token pattern"));

/// Well-known credential formats, with the capture group holding the secret.
static KNOWN_SECRETS: Lazy<Vec<(&'static str, Regex, usize)>> = Lazy::new(|| {
    [
        ("aws_access_key", r"\b(?:AKIA|ASIA)[0-9A-Z]{16}\b", 0),
        ("github_token", r"\bgh[pousr]_[A-Za-z0-9]{36,255}\b", 0),
        ("slack_token", r"\bxox[abposr]-[A-Za-z0-9\-]{10,}", 0),
        ("stripe_key", r"\b(?:sk|pk|rk)_(?:live|test)_[A-Za-z0-9]{16,}\b", 0),
        ("google_api_key", r"\bAIza[0-9A-Za-z_\-]{35}", 0),
        ("jwt", r"\beyJ[A-Za-z0-9_\-]{8,}\.[A-Za-z0-9_\-]{8,}\.[A-Za-z0-9_\-]{8,}", 0),
        ("private_key_header", r"-----BEGIN (?:[A-Z]+ )*PRIVATE KEY-----", 0),
        (
            "labelled_secret",
            r#"\b(?i:api[_\-]?key|secret|token|password|passwd|pwd|access[_\-]?key)\s*[:=]\s*([^\s'"]{6,})"#,
            1,
        ),
    ]
    .into_iter()
    .map(|(name, pattern, group)| (name, Regex::new(pattern).expect("secret pattern"), group))
    .collect()
});

/// Byte spans of the digit runs in a card candidate.
fn digit_groups(candidate: &str) -> Vec<(usize, usize)> {
    let mut groups = Vec::new();
    let mut start = None;
    for (i, b) in candidate.bytes().enumerate() {
        if b.is_ascii_digit() {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start.take() {
            groups.push((s, i));
        }
    }
    if let Some(s) = start {
        groups.push((s, candidate.len()));
    }
    groups
}

/// Detector for one built-in category.
#[derive(Debug)]
pub struct BuiltinDetector {
    category: BuiltinCategory,
    rule_id: String,
    require_luhn: bool,
    scorer: SecretScorer,
}

impl BuiltinDetector {
    pub fn new(category: BuiltinCategory, settings: &EngineSettings) -> Self {
        Self {
            category,
            rule_id: format!("builtin:{}", category),
            require_luhn: settings.credit_card_luhn,
            scorer: SecretScorer::new(settings.secret_min_length, settings.secret_entropy_threshold),
        }
    }

    fn detect_ips(&self, text: &str) -> Vec<Match> {
        let mut found = find_all(&IPV4, text, Category::IpAddress, &self.rule_id);
        let bytes = text.as_bytes();

        for m in IPV6_CANDIDATE.find_iter(text) {
            let (start, end) = (m.start(), m.end());
            if start > 0 && bytes[start - 1].is_ascii_alphanumeric() {
                continue;
            }
            if end < bytes.len() {
                let next = bytes[end];
                let dotted_v4_tail = next == b'.' && bytes.get(end + 1).is_some_and(u8::is_ascii_digit);
                if next.is_ascii_alphanumeric() || dotted_v4_tail {
                    continue;
                }
            }

            let mut candidate = m.as_str();
            if candidate.bytes().filter(u8::is_ascii_hexdigit).count() < IPV6_MIN_HEX_DIGITS {
                continue;
            }
            if candidate.parse::<Ipv6Addr>().is_err() {
                // "fe80::1:" when the address is followed by a colon in prose.
                match candidate.strip_suffix(':') {
                    Some(trimmed) if !trimmed.ends_with(':') && trimmed.parse::<Ipv6Addr>().is_ok() => {
                        candidate = trimmed;
                    }
                    _ => continue,
                }
            }
            found.push(Match::new(candidate, Category::IpAddress, start, start + candidate.len(), &self.rule_id));
        }
        found
    }

    fn detect_credit_cards(&self, text: &str) -> Vec<Match> {
        let mut found = Vec::new();
        for m in CREDIT_CARD.find_iter(text) {
            let candidate = m.as_str();
            if is_valid_credit_card(candidate, self.require_luhn) {
                found.push(Match::new(candidate, Category::CreditCard, m.start(), m.end(), &self.rule_id));
                continue;
            }

            // The pattern is greedy and can swallow a neighbouring number
            // ("2 4111 ...", "... 1111 12/25"); look for a card inside it.
            let runs = self.valid_group_runs(candidate);
            if runs.is_empty() {
                let dropped = Match::new(candidate, Category::CreditCard, m.start(), m.end(), &self.rule_id);
                log_dropped_match_debug(module_path!(), &dropped, "failed card validation");
            }
            for (s, e) in runs {
                found.push(Match::new(
                    &candidate[s..e],
                    Category::CreditCard,
                    m.start() + s,
                    m.start() + e,
                    &self.rule_id,
                ));
            }
        }
        found
    }

    /// Non-overlapping runs of whole digit groups inside `candidate` that
    /// validate as cards, longest first.
    fn valid_group_runs(&self, candidate: &str) -> Vec<(usize, usize)> {
        let groups = digit_groups(candidate);
        let mut runs = Vec::new();
        for (i, &(start, _)) in groups.iter().enumerate() {
            for &(_, end) in &groups[i..] {
                if is_valid_credit_card(&candidate[start..end], self.require_luhn) {
                    runs.push((start, end));
                }
            }
        }
        runs.sort_by_key(|&(s, e)| (Reverse(e - s), s));

        let mut chosen: Vec<(usize, usize)> = Vec::new();
        for (s, e) in runs {
            if chosen.iter().all(|&(cs, ce)| e <= cs || s >= ce) {
                chosen.push((s, e));
            }
        }
        chosen.sort_unstable();
        chosen
    }

    fn detect_secrets(&self, text: &str) -> Vec<Match> {
        let mut found: Vec<Match> = Vec::new();

        for (name, regex, group) in KNOWN_SECRETS.iter() {
            for caps in regex.captures_iter(text) {
                let Some(m) = caps.get(*group) else { continue };
                if m.is_empty() || found.iter().any(|f| f.start == m.start() && f.end == m.end()) {
                    continue;
                }
                log::trace!("Known secret format '{}' matched at {}..{}", name, m.start(), m.end());
                found.push(Match::new(m.as_str(), Category::Secret, m.start(), m.end(), &self.rule_id));
            }
        }

        let bytes = text.as_bytes();
        for m in SECRET_TOKEN.find_iter(text) {
            if found.iter().any(|f| f.start < m.end() && m.start() < f.end) {
                continue;
            }
            let verdict = self.scorer.evaluate(bytes, m.start(), m.end());
            if verdict.is_secret {
                log::trace!(
                    "High-entropy token at {}..{} (entropy {:.2}, classes {}, context {})",
                    m.start(),
                    m.end(),
                    verdict.entropy,
                    verdict.classes,
                    verdict.has_context
                );
                found.push(Match::new(m.as_str(), Category::Secret, m.start(), m.end(), &self.rule_id));
            }
        }
        found
    }

    fn detect_generic_pii(&self, text: &str) -> Vec<Match> {
        let mut found = find_all(&PHONE, text, Category::GenericPii, &self.rule_id);
        found.extend(
            find_all(&SSN, text, Category::GenericPii, &self.rule_id)
                .into_iter()
                .filter(|m| is_valid_ssn(&m.text)),
        );
        found.extend(
            find_all(&UK_NINO, text, Category::GenericPii, &self.rule_id)
                .into_iter()
                .filter(|m| is_valid_uk_nino(&m.text)),
        );
        found
    }
}

impl Detector for BuiltinDetector {
    fn rule_id(&self) -> &str {
        &self.rule_id
    }

    fn category(&self) -> Category {
        match self.category {
            BuiltinCategory::Email => Category::Email,
            BuiltinCategory::IpAddress => Category::IpAddress,
            BuiltinCategory::CreditCard => Category::CreditCard,
            BuiltinCategory::Secret => Category::Secret,
            BuiltinCategory::GenericPii => Category::GenericPii,
        }
    }

    fn detect(&self, text: &str) -> Vec<Match> {
        let mut found = match self.category {
            BuiltinCategory::Email => find_all(&EMAIL, text, Category::Email, &self.rule_id),
            BuiltinCategory::IpAddress => self.detect_ips(text),
            BuiltinCategory::CreditCard => self.detect_credit_cards(text),
            BuiltinCategory::Secret => self.detect_secrets(text),
            BuiltinCategory::GenericPii => self.detect_generic_pii(text),
        };
        found.sort_by_key(|m| (m.start, m.end));
        found.dedup_by(|a, b| a.start == b.start && a.end == b.end);
        found
    }
}
