//! Literal block-word detection.
//!
//! A block word is matched as a literal, case-insensitively. Regex
//! metacharacters in the word carry no meaning, and a word boundary is only
//! required on a side whose edge character is itself a word character, so
//! `"@acme"` still matches in `"mail @acme today"`.

use regex::{Regex, RegexBuilder};

use super::{find_all, Detector};
use crate::errors::AutoRedactError;
use crate::redaction_match::{Category, Match};

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Builds the pattern for a trimmed, non-empty literal.
pub fn block_word_pattern(word: &str) -> String {
    let mut pattern = String::with_capacity(word.len() + 8);
    if word.chars().next().is_some_and(is_word_char) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(word));
    if word.chars().next_back().is_some_and(is_word_char) {
        pattern.push_str(r"\b");
    }
    pattern
}

#[derive(Debug)]
pub struct BlockWordDetector {
    rule_id: String,
    regex: Regex,
}

impl BlockWordDetector {
    pub fn new(word: &str, rule_id: String) -> Result<Self, AutoRedactError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(AutoRedactError::Config(format!("block word for rule '{}' is empty", rule_id)));
        }
        let regex = RegexBuilder::new(&block_word_pattern(word))
            .case_insensitive(true)
            .build()
            .map_err(|e| AutoRedactError::RuleCompilation(rule_id.clone(), e))?;
        Ok(Self { rule_id, regex })
    }
}

impl Detector for BlockWordDetector {
    fn rule_id(&self) -> &str {
        &self.rule_id
    }

    fn category(&self) -> Category {
        Category::BlockWord
    }

    fn detect(&self, text: &str) -> Vec<Match> {
        find_all(&self.regex, text, Category::BlockWord, &self.rule_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector(word: &str) -> BlockWordDetector {
        BlockWordDetector::new(word, format!("block_word:{}", word)).unwrap()
    }

    #[test]
    fn metacharacters_are_literal() {
        let d = detector("a.b");
        assert!(d.detect("axb").is_empty());
        let found = d.detect("value a.b here");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start, 6);
    }

    #[test]
    fn whole_words_only() {
        let d = detector("cat");
        assert!(d.detect("concatenate").is_empty());
        assert_eq!(d.detect("Cat, CAT and cat.").len(), 3);
    }

    #[test]
    fn non_word_edges_need_no_boundary() {
        let d = detector("@acme");
        assert_eq!(d.detect("ping @acme now").len(), 1);
        assert_eq!(block_word_pattern("@acme"), r"@acme\b");
    }

    #[test]
    fn word_is_trimmed() {
        let d = detector("  Project X  ");
        let found = d.detect("the project x files");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "project x");
    }

    #[test]
    fn blank_word_is_rejected() {
        assert!(BlockWordDetector::new("   ", "block_word:".into()).is_err());
    }
}
