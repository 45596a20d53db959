// autoredact-core/src/engine.rs
//! The redaction engine: one pass from OCR words to redaction regions.
//!
//! A [`RedactionEngine`] is compiled once from a [`RuleConfiguration`] and is
//! immutable afterwards. It holds no per-call state, so a single engine can
//! be shared (e.g. behind an `Arc`) by any number of concurrent callers, and
//! two calls with the same words always produce the same result.
//!
//! Pipeline per call:
//!
//! 1. [`WordIndex::build`] joins the words into one text blob.
//! 2. [`DetectorSet::detect`] runs every compiled rule over the blob.
//! 3. [`AllowlistSet::filter`] drops allowlisted matches.
//! 4. [`OverlapMapper::map_all`] projects each match onto its words.
//! 5. [`RegionMerger`] pads, merges and counts.
//!
//! License: MIT OR Apache-2.0

use log::debug;
use serde::{Deserialize, Serialize};

use crate::allowlist::AllowlistSet;
use crate::config::{EngineSettings, RuleConfiguration};
use crate::detectors::DetectorSet;
use crate::errors::RuleWarning;
use crate::overlap::{MappedMatch, OverlapMapper};
use crate::redaction_match::Category;
use crate::regions::{DetectionBreakdown, Region, RegionMerger};
use crate::word_index::{OcrWord, WordIndex};

/// Provenance of one surviving match. Carries no matched text, so it can be
/// written out or logged freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub category: Category,
    pub rule_id: String,
    pub char_start: usize,
    pub char_end: usize,
    /// Padded box of every word the match was mapped onto, before merging.
    pub boxes: Vec<Region>,
}

impl Detection {
    fn from_mapped(mapped: &MappedMatch, padding: i32) -> Self {
        Self {
            category: mapped.matched.category,
            rule_id: mapped.matched.rule_id.clone(),
            char_start: mapped.matched.start,
            char_end: mapped.matched.end,
            boxes: mapped
                .words
                .iter()
                .map(|w| Region::from_bbox(&w.bbox).padded(padding))
                .collect(),
        }
    }
}

/// Outcome of one [`RedactionEngine::redact`] call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactionResult {
    /// Non-overlapping, padded, unclamped rectangles to paint.
    pub regions: Vec<Region>,
    pub breakdown: DetectionBreakdown,
    #[serde(default)]
    pub detections: Vec<Detection>,
    /// Rules that were skipped when the engine was compiled.
    #[serde(default)]
    pub warnings: Vec<RuleWarning>,
}

impl RedactionResult {
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Compiled, immutable snapshot of a rule configuration.
#[derive(Debug)]
pub struct RedactionEngine {
    detectors: DetectorSet,
    allowlist: AllowlistSet,
    mapper: OverlapMapper,
    settings: EngineSettings,
}

impl RedactionEngine {
    /// Compiles `config`. Never fails: rules that do not compile are skipped
    /// and reported through [`RedactionEngine::warnings`] and every result.
    pub fn new(config: &RuleConfiguration) -> Self {
        let detectors = DetectorSet::compile(config);
        let allowlist = AllowlistSet::new(&config.allowlist);
        debug!(
            "Redaction engine ready: {} detectors, {} allowlist entries, padding {}.",
            detectors.len(),
            allowlist.len(),
            config.engine.padding
        );
        Self {
            detectors,
            allowlist,
            mapper: OverlapMapper::new(config.engine.require_text_containment, config.engine.trim_word_punctuation),
            settings: config.engine.clone(),
        }
    }

    pub fn warnings(&self) -> &[RuleWarning] {
        self.detectors.warnings()
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Words in reading order in, regions and counts out.
    pub fn redact(&self, words: &[OcrWord]) -> RedactionResult {
        let index = WordIndex::build(words);
        if index.is_empty() {
            return RedactionResult {
                warnings: self.warnings().to_vec(),
                ..RedactionResult::default()
            };
        }

        let found = self.detectors.detect(index.text_blob());
        let found_count = found.len();
        let kept = self.allowlist.filter(found);
        let kept_count = kept.len();
        let mapped = self.mapper.map_all(kept, &index);

        let mut merger = RegionMerger::new(self.settings.padding);
        let detections: Vec<Detection> = mapped
            .iter()
            .map(|m| {
                merger.add(m);
                Detection::from_mapped(m, self.settings.padding)
            })
            .collect();
        let (regions, breakdown) = merger.finish();

        debug!(
            "Redaction pass: {} matches, {} after allowlist, {} mapped, {} regions.",
            found_count,
            kept_count,
            mapped.len(),
            regions.len()
        );

        RedactionResult {
            regions,
            breakdown,
            detections,
            warnings: self.warnings().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuiltinCategory;
    use crate::word_index::BoundingBox;

    fn line(words: &[&str]) -> Vec<OcrWord> {
        let mut x = 0;
        words
            .iter()
            .map(|w| {
                let width = 10 * w.len() as i32;
                let word = OcrWord::new(*w, BoundingBox::new(x, 0, x + width, 20));
                x += width + 10;
                word
            })
            .collect()
    }

    #[test]
    fn email_in_sentence() {
        let engine = RedactionEngine::new(&RuleConfiguration::default());
        let result = engine.redact(&line(&["contact", "john", "doe@example.com", "today"]));
        assert_eq!(result.breakdown.emails, 1);
        assert_eq!(result.breakdown.total(), 1);
        assert_eq!(result.regions.len(), 1);
        assert_eq!(result.detections[0].rule_id, "builtin:email");
        assert_eq!(result.detections[0].boxes.len(), 1);
    }

    #[test]
    fn invalid_rule_surfaces_as_warning() {
        let mut config = RuleConfiguration::with_builtins([BuiltinCategory::Email]);
        config.custom_dates = vec!["someday".into()];
        let engine = RedactionEngine::new(&config);
        assert_eq!(engine.warnings().len(), 1);
        let result = engine.redact(&[]);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].rule_id, "custom_date:someday");
    }

    #[test]
    fn result_serializes_with_camel_case_breakdown() {
        let engine = RedactionEngine::new(&RuleConfiguration::default());
        let result = engine.redact(&line(&["card", "4111111111111111"]));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["breakdown"]["creditCards"], 1);
        assert_eq!(json["detections"][0]["category"], "credit_card");
    }
}
