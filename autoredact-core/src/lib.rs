// autoredact-core/src/lib.rs
//! # AutoRedact Core Library
//!
//! `autoredact-core` decides *where* to black out an image. It takes the
//! words an OCR engine found on a page (text plus pixel box, in reading
//! order) and a rule configuration, and returns the padded rectangles to
//! paint together with per-category counts of what was found.
//!
//! The library performs no OCR, no image decoding and no drawing. It is
//! synchronous and free of shared mutable state: a compiled
//! [`RedactionEngine`] is an immutable snapshot that can serve concurrent
//! callers.
//!
//! ## Modules
//!
//! * `word_index`: joins OCR words into one text blob and maps spans back to words.
//! * `detectors`: built-in, block-word, custom-date and custom-regex detectors.
//! * `validators`: Luhn, SSN and NINO structural checks applied after matching.
//! * `allowlist`: exact, case-insensitive exemptions.
//! * `overlap`: projects matches onto the words they cover.
//! * `regions`: padding, merging and the detection breakdown.
//! * `engine`: the compiled [`RedactionEngine`].
//! * `headless`: one-shot convenience wrappers.
//! * `config`: [`RuleConfiguration`] loading, merging and validation.
//! * `errors`: [`AutoRedactError`] and non-fatal [`RuleWarning`]s.
//!
//! ## Usage Example
//!
//! ```rust
//! use autoredact_core::{headless, BoundingBox, OcrWord, RuleConfiguration};
//!
//! let words = vec![
//!     OcrWord::new("Contact:", BoundingBox::new(10, 10, 80, 30)),
//!     OcrWord::new("jane@example.com", BoundingBox::new(90, 10, 250, 30)),
//! ];
//!
//! let result = headless::redact(&words, &RuleConfiguration::default());
//! assert_eq!(result.breakdown.emails, 1);
//! assert_eq!(result.regions.len(), 1);
//! assert_eq!(result.regions[0].x0, 88);
//! ```
//!
//! ## Error Handling
//!
//! Compiling an engine never fails. A rule that cannot be compiled (an
//! invalid custom regex, an unreadable custom date) is skipped and reported
//! as a [`RuleWarning`] on the engine and on every result. Configuration
//! loading returns `anyhow::Result` with context attached.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod allowlist;
pub mod config;
pub mod detectors;
pub mod engine;
pub mod errors;
pub mod headless;
pub mod overlap;
pub mod redaction_match;
pub mod regions;
pub mod validators;
pub mod word_index;

/// Configuration types and helpers.
pub use config::{
    merge_settings,
    BuiltinCategory,
    CustomRegexRule,
    EngineSettings,
    RuleConfiguration,
    UserConfiguration,
    UserEngineSettings,
    MAX_PATTERN_LENGTH,
};

pub use errors::{AutoRedactError, RuleWarning};

/// The engine and its result types.
pub use engine::{Detection, RedactionEngine, RedactionResult};

pub use detectors::{DetectionRule, Detector, DetectorSet};
pub use allowlist::{AllowlistSet, DEFAULT_ALLOWLIST};
pub use overlap::{has_valid_overlap, MappedMatch, OverlapMapper};
pub use regions::{merge_regions, DetectionBreakdown, Region, RegionMerger};
pub use redaction_match::{redact_sensitive, Category, Match, ReportBucket};
pub use word_index::{BoundingBox, OcrWord, Word, WordIndex};
