// autoredact-entropy/src/lib.rs
//! Token-level secret scoring for AutoRedact.
//!
//! OCR output is noisy: a detector cannot rely on exact key formats alone, so
//! this crate grades individual tokens by how random they look (Shannon
//! entropy), how many character classes they mix, and whether a credential
//! keyword sits right before them.
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod entropy;
pub mod context;
pub mod scoring;

pub use context::KeywordContext;
pub use entropy::{shannon_entropy, CharClasses};
pub use scoring::{SecretScorer, TokenVerdict};

/// Entropy in bits per symbol.
pub type EntropyScore = f64;
