// autoredact-core/src/regions.rs
//! Padded redaction regions and per-bucket statistics.
//!
//! Regions are half-open pixel rectangles (`x0..x1`, `y0..y1`, y pointing
//! down). The merger emits them unclamped; fitting them to an image is left
//! to whoever draws them (see [`Region::clamp`]).
//!
//! License: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::overlap::MappedMatch;
use crate::redaction_match::ReportBucket;
use crate::word_index::BoundingBox;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Region {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn from_bbox(bbox: &BoundingBox) -> Self {
        Self::new(bbox.x0, bbox.y0, bbox.x1, bbox.y1)
    }

    /// Grows the rectangle by `padding` pixels on every side.
    pub fn padded(self, padding: i32) -> Self {
        Self::new(self.x0 - padding, self.y0 - padding, self.x1 + padding, self.y1 + padding)
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    /// True when the two rectangles share a positive area, or are identical.
    pub fn overlaps(&self, other: &Region) -> bool {
        self == other
            || (self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1)
    }

    pub fn union(&self, other: &Region) -> Region {
        Region::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    /// Fits the rectangle into a `width` x `height` image. `None` when
    /// nothing of it is left inside.
    pub fn clamp(&self, width: u32, height: u32) -> Option<Region> {
        let w = i32::try_from(width).unwrap_or(i32::MAX);
        let h = i32::try_from(height).unwrap_or(i32::MAX);
        let clamped = Region::new(self.x0.max(0), self.y0.max(0), self.x1.min(w), self.y1.min(h));
        (clamped.width() > 0 && clamped.height() > 0).then_some(clamped)
    }
}

/// Count of surviving, mapped matches per reporting bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionBreakdown {
    pub emails: usize,
    pub ips: usize,
    pub credit_cards: usize,
    pub secrets: usize,
    pub pii: usize,
}

impl DetectionBreakdown {
    pub fn record(&mut self, bucket: ReportBucket) {
        *self.slot(bucket) += 1;
    }

    pub fn get(&self, bucket: ReportBucket) -> usize {
        match bucket {
            ReportBucket::Emails => self.emails,
            ReportBucket::Ips => self.ips,
            ReportBucket::CreditCards => self.credit_cards,
            ReportBucket::Secrets => self.secrets,
            ReportBucket::Pii => self.pii,
        }
    }

    fn slot(&mut self, bucket: ReportBucket) -> &mut usize {
        match bucket {
            ReportBucket::Emails => &mut self.emails,
            ReportBucket::Ips => &mut self.ips,
            ReportBucket::CreditCards => &mut self.credit_cards,
            ReportBucket::Secrets => &mut self.secrets,
            ReportBucket::Pii => &mut self.pii,
        }
    }

    pub fn total(&self) -> usize {
        self.emails + self.ips + self.credit_cards + self.secrets + self.pii
    }

    /// Adds another breakdown into this one (multi-page totals).
    pub fn accumulate(&mut self, other: &DetectionBreakdown) {
        self.emails += other.emails;
        self.ips += other.ips;
        self.credit_cards += other.credit_cards;
        self.secrets += other.secrets;
        self.pii += other.pii;
    }
}

/// Collapses overlapping rectangles into their union until no two overlap.
///
/// A merged region takes the place of the earliest region it absorbed, so
/// the output order follows the input order.
pub fn merge_regions(regions: impl IntoIterator<Item = Region>) -> Vec<Region> {
    let mut merged: Vec<Region> = Vec::new();

    for region in regions {
        let mut current = region;
        let mut slot = merged.len();
        while let Some(i) = merged.iter().position(|m| m.overlaps(&current)) {
            current = current.union(&merged.remove(i));
            slot = slot.min(i);
        }
        merged.insert(slot, current);
    }
    merged
}

/// Accumulates mapped matches into padded regions and bucket counts.
#[derive(Debug, Clone)]
pub struct RegionMerger {
    padding: i32,
    regions: Vec<Region>,
    breakdown: DetectionBreakdown,
}

impl RegionMerger {
    pub fn new(padding: i32) -> Self {
        Self {
            padding,
            regions: Vec::new(),
            breakdown: DetectionBreakdown::default(),
        }
    }

    /// Counts the match once and queues one padded region per word.
    pub fn add(&mut self, mapped: &MappedMatch) {
        self.breakdown.record(mapped.matched.category.bucket());
        self.regions.extend(
            mapped
                .words
                .iter()
                .map(|w| Region::from_bbox(&w.bbox).padded(self.padding)),
        );
    }

    pub fn finish(self) -> (Vec<Region>, DetectionBreakdown) {
        (merge_regions(self.regions), self.breakdown)
    }
}
