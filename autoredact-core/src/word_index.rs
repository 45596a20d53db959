// autoredact-core/src/word_index.rs
//! Reconstructs a single, offset-addressable text blob from OCR words.
//!
//! OCR hands us discrete tokens with pixel boxes. Detectors want continuous
//! text. [`WordIndex`] joins the tokens with a single space and remembers the
//! byte span each word occupies in the joined text, so a match found in the
//! blob can be traced back to the words (and pixels) it came from.
//!
//! All offsets are byte offsets into the UTF-8 blob, which is also what the
//! `regex` crate reports, so spans never need converting.

use log::debug;
use serde::{Deserialize, Serialize};

/// Separator inserted between consecutive words.
pub const WORD_SEPARATOR: char = ' ';

/// Pixel rectangle in image space (y grows downwards). `x1`/`y1` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl BoundingBox {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }
}

/// A word as delivered by the OCR collaborator, in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrWord {
    pub text: String,
    pub bbox: BoundingBox,
    /// Recognition confidence (0-100), when the OCR engine reports one.
    #[serde(default)]
    pub confidence: Option<f32>,
}

impl OcrWord {
    pub fn new(text: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bbox,
            confidence: None,
        }
    }
}

/// A word placed in the text blob. `char_end - char_start == text.len()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Word {
    pub text: String,
    pub bbox: BoundingBox,
    pub char_start: usize,
    pub char_end: usize,
}

/// Ordered words plus the text they concatenate to.
#[derive(Debug, Clone, Default)]
pub struct WordIndex {
    words: Vec<Word>,
    text: String,
}

impl WordIndex {
    /// Builds the index. Words whose text is blank are skipped: they have no
    /// characters a pattern could match and would only add stray separators.
    pub fn build(ocr_words: &[OcrWord]) -> Self {
        let mut text = String::new();
        let mut words = Vec::with_capacity(ocr_words.len());

        for ocr_word in ocr_words {
            if ocr_word.text.trim().is_empty() {
                continue;
            }
            if !words.is_empty() {
                text.push(WORD_SEPARATOR);
            }
            let char_start = text.len();
            text.push_str(&ocr_word.text);
            words.push(Word {
                text: ocr_word.text.clone(),
                bbox: ocr_word.bbox,
                char_start,
                char_end: text.len(),
            });
        }

        debug!(
            "Built word index: {} words ({} skipped), {} bytes of text.",
            words.len(),
            ocr_words.len() - words.len(),
            text.len()
        );

        Self { words, text }
    }

    pub fn text_blob(&self) -> &str {
        &self.text
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Every word whose `[char_start, char_end)` intersects `[start, end)`.
    ///
    /// Words are sorted and disjoint, so a binary search finds the first
    /// candidate and a forward scan collects the rest: O(log n + k).
    pub fn words_overlapping(&self, start: usize, end: usize) -> &[Word] {
        if start >= end {
            return &[];
        }
        let first = self.words.partition_point(|w| w.char_end <= start);
        let count = self.words[first..]
            .iter()
            .take_while(|w| w.char_start < end)
            .count();
        &self.words[first..first + count]
    }
}
