// autoredact/src/input.rs
//! Readers for OCR output produced by external engines.
//!
//! Two shapes are understood:
//!
//! * JSON: an array of `{"text", "bbox": {"x0","y0","x1","y1"}, "confidence"?}`
//!   words (the tesseract.js word shape), optionally wrapped as `{"words": [...]}`.
//! * Tesseract TSV (`tesseract img out tsv`): only word rows (`level == 5`)
//!   with non-empty text and a non-negative confidence are kept.

use clap::ValueEnum;
use log::debug;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use autoredact_core::{BoundingBox, OcrWord};

const TSV_COLUMNS: usize = 12;
const TSV_WORD_LEVEL: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// JSON word list.
    Json,
    /// Tesseract TSV output.
    Tsv,
}

impl InputFormat {
    /// `.tsv` and `.txt` files are read as Tesseract TSV, everything else as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase) {
            Some(ext) if ext == "tsv" || ext == "txt" => InputFormat::Tsv,
            _ => InputFormat::Json,
        }
    }
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read word file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON word list: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed TSV on line {line}: {message}")]
    Tsv { line: usize, message: String },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WordFile {
    Bare(Vec<OcrWord>),
    Wrapped { words: Vec<OcrWord> },
}

pub fn parse_json_words(text: &str) -> Result<Vec<OcrWord>, InputError> {
    let words = match serde_json::from_str::<WordFile>(text) {
        Ok(WordFile::Bare(words)) | Ok(WordFile::Wrapped { words }) => words,
        // Re-parse as a bare list so the error points at the real problem.
        Err(_) => serde_json::from_str::<Vec<OcrWord>>(text)?,
    };
    Ok(words)
}

fn tsv_int(cols: &[&str], idx: usize, line: usize) -> Result<i32, InputError> {
    cols[idx].trim().parse::<i32>().map_err(|e| InputError::Tsv {
        line,
        message: format!("column {} ('{}'): {}", idx + 1, cols[idx], e),
    })
}

pub fn parse_tesseract_tsv(text: &str) -> Result<Vec<OcrWord>, InputError> {
    let mut words = Vec::new();

    // Line 1 is the header.
    for (i, row) in text.lines().enumerate().skip(1) {
        let line = i + 1;
        let cols: Vec<&str> = row.split('\t').collect();
        if cols.len() < TSV_COLUMNS {
            continue;
        }

        let level: i32 = cols[0].trim().parse().unwrap_or(-1);
        let conf: f32 = cols[10].trim().parse().unwrap_or(-1.0);
        let word_text = cols[11].trim();
        if level != TSV_WORD_LEVEL || word_text.is_empty() || conf < 0.0 {
            continue;
        }

        let left = tsv_int(&cols, 6, line)?;
        let top = tsv_int(&cols, 7, line)?;
        let width = tsv_int(&cols, 8, line)?;
        let height = tsv_int(&cols, 9, line)?;

        let mut word = OcrWord::new(word_text, BoundingBox::new(left, top, left + width, top + height));
        word.confidence = Some(conf);
        words.push(word);
    }

    Ok(words)
}

/// Reads a word file, guessing the format from the extension when `format` is `None`.
pub fn read_words(path: &Path, format: Option<InputFormat>) -> Result<Vec<OcrWord>, InputError> {
    let text = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let format = format.unwrap_or_else(|| InputFormat::from_path(path));
    let words = match format {
        InputFormat::Json => parse_json_words(&text)?,
        InputFormat::Tsv => parse_tesseract_tsv(&text)?,
    };
    debug!("Read {} OCR words from {} ({:?}).", words.len(), path.display(), format);
    Ok(words)
}
