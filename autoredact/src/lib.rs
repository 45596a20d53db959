// autoredact/src/lib.rs
//! # AutoRedact CLI
//!
//! Command-line front end for `autoredact-core`. It reads OCR word lists
//! (JSON or Tesseract TSV), resolves the rule configuration from defaults,
//! a settings file and flags, runs the engine and reports what it found.
//! The `redact` command can paint the resulting regions onto the source
//! screenshot; `scan` summarises many pages at once.

pub mod cli;
pub mod commands;
pub mod input;
pub mod logger;
pub mod paint;
pub mod settings;
pub mod ui;
