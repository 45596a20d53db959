// File: autoredact-core/src/validators.rs
//! Programmatic validation applied after a pattern has matched.
//!
//! OCR text is full of digit runs (invoice numbers, timestamps, page counts).
//! These checks reject candidates whose structure cannot belong to the
//! category, keeping false positives down without touching the regexes.
//!
//! License: MIT OR Apache-2.0

use std::collections::HashSet;
use once_cell::sync::Lazy;

/// Card numbers are 13 to 19 digits long (ISO/IEC 7812).
pub const CARD_DIGITS_MIN: usize = 13;
pub const CARD_DIGITS_MAX: usize = 19;

/// Validates a digit string with the Luhn (mod 10) checksum.
///
/// Returns `false` for empty input or any non-digit character.
pub fn is_valid_luhn(digits: &str) -> bool {
    if digits.is_empty() {
        return false;
    }

    let mut sum = 0u32;
    for (i, c) in digits.chars().rev().enumerate() {
        let Some(mut d) = c.to_digit(10) else { return false; };
        if i % 2 == 1 {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
    }
    sum % 10 == 0
}

/// Extracts the digits of a card candidate (dropping spaces and hyphens) and
/// checks the length range. Returns the bare digits when plausible.
pub fn card_digits(candidate: &str) -> Option<String> {
    let digits: String = candidate.chars().filter(|c| c.is_ascii_digit()).collect();
    (CARD_DIGITS_MIN..=CARD_DIGITS_MAX)
        .contains(&digits.len())
        .then_some(digits)
}

/// A card candidate is valid when it has a plausible length and, if
/// `require_luhn` is set, passes the Luhn checksum.
pub fn is_valid_credit_card(candidate: &str, require_luhn: bool) -> bool {
    match card_digits(candidate) {
        Some(digits) => !require_luhn || is_valid_luhn(&digits),
        None => false,
    }
}

/// Structural check for a US SSN written as `AAA-GG-SSSS` or `AAA GG SSSS`.
///
/// Rejects area 000, 666 and 900-999, group 00 and serial 0000.
pub fn is_valid_ssn(ssn: &str) -> bool {
    let parts: Vec<&str> = ssn.split(['-', ' ']).collect();
    let [area, group, serial] = parts.as_slice() else {
        return false;
    };
    if area.len() != 3 || group.len() != 2 || serial.len() != 4 {
        return false;
    }

    let (Ok(area), Ok(group), Ok(serial)) =
        (area.parse::<u16>(), group.parse::<u8>(), serial.parse::<u16>())
    else {
        return false;
    };

    area != 0 && area != 666 && area < 900 && group != 0 && serial != 0
}

static INVALID_NINO_PREFIXES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["BG", "GB", "KN", "NK", "NT", "TN", "ZZ"].into_iter().collect()
});

/// Structural check for a UK National Insurance number (`AB123456C`),
/// spaces allowed, case-insensitive.
pub fn is_valid_uk_nino(nino: &str) -> bool {
    let compact: String = nino
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    let bytes = compact.as_bytes();
    if bytes.len() != 9 {
        return false;
    }

    let (first, second) = (bytes[0], bytes[1]);
    if !first.is_ascii_alphabetic() || !second.is_ascii_alphabetic() {
        return false;
    }
    if b"DFIQUV".contains(&first) || b"DFIQUVO".contains(&second) {
        return false;
    }
    if INVALID_NINO_PREFIXES.contains(&compact[..2]) {
        return false;
    }
    bytes[2..8].iter().all(u8::is_ascii_digit) && matches!(bytes[8], b'A'..=b'D')
}
