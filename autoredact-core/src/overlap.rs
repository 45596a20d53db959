// autoredact-core/src/overlap.rs
//! Projection of character-span matches back onto OCR words.
//!
//! A word is redacted for a match when their spans intersect and, unless
//! disabled, their texts contain one another. The text check stops a word
//! that only shares an index range with a match (through separator counting
//! or segmentation drift) from being blacked out.
//!
//! License: MIT OR Apache-2.0

use crate::redaction_match::{log_dropped_match_debug, Match};
use crate::word_index::{Word, WordIndex};

/// Strips leading and trailing punctuation fused to a word by OCR
/// (`"123-4567,"` -> `"123-4567"`).
fn word_core(text: &str) -> &str {
    text.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Two-part acceptance test of a candidate word for a match.
///
/// Spans must intersect and, when `require_text_containment` is set, the
/// word text must contain the match text or be contained in it
/// (case-insensitive). With `trim_word_punctuation` a word whose core, edge
/// punctuation stripped, is contained in the match is accepted as well.
pub fn has_valid_overlap(word: &Word, m: &Match, require_text_containment: bool, trim_word_punctuation: bool) -> bool {
    let positional = word.char_start < m.end && word.char_end > m.start;
    if !positional {
        return false;
    }
    if !require_text_containment {
        return true;
    }

    let word_text = word.text.to_lowercase();
    let match_text = m.text.to_lowercase();
    if word_text.contains(&match_text) || match_text.contains(&word_text) {
        return true;
    }
    if !trim_word_punctuation {
        return false;
    }
    let core = word_core(&word_text);
    !core.is_empty() && match_text.contains(core)
}

/// A surviving match together with the words it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedMatch {
    pub matched: Match,
    pub words: Vec<Word>,
}

#[derive(Debug, Clone, Copy)]
pub struct OverlapMapper {
    require_text_containment: bool,
    trim_word_punctuation: bool,
}

impl Default for OverlapMapper {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl OverlapMapper {
    pub fn new(require_text_containment: bool, trim_word_punctuation: bool) -> Self {
        Self {
            require_text_containment,
            trim_word_punctuation,
        }
    }

    /// Words whose boxes must be redacted for `m`, in reading order.
    pub fn map<'a>(&self, m: &Match, index: &'a WordIndex) -> Vec<&'a Word> {
        index
            .words_overlapping(m.start, m.end)
            .iter()
            .filter(|w| has_valid_overlap(w, m, self.require_text_containment, self.trim_word_punctuation))
            .collect()
    }

    /// Maps every match, dropping the ones no word accepts.
    pub fn map_all(&self, matches: Vec<Match>, index: &WordIndex) -> Vec<MappedMatch> {
        matches
            .into_iter()
            .filter_map(|m| {
                let words: Vec<Word> = self.map(&m, index).into_iter().cloned().collect();
                if words.is_empty() {
                    log_dropped_match_debug(module_path!(), &m, "no word passed the overlap test");
                    None
                } else {
                    Some(MappedMatch { matched: m, words })
                }
            })
            .collect()
    }
}
