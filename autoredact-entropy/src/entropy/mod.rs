// autoredact-entropy/src/entropy/mod.rs
use libm::log2;

use crate::EntropyScore;

/// Calculates the Shannon entropy of a token, in bits per byte.
pub fn shannon_entropy(token: &[u8]) -> EntropyScore {
    if token.is_empty() {
        return 0.0;
    }

    let mut counts = [0u32; 256];
    for &b in token {
        counts[b as usize] += 1;
    }

    let len = token.len() as f64;
    counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / len;
            -p * log2(p)
        })
        .sum()
}

/// Which ASCII character classes appear in a token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharClasses {
    pub lower: bool,
    pub upper: bool,
    pub digit: bool,
    pub symbol: bool,
}

impl CharClasses {
    pub fn of(token: &[u8]) -> Self {
        let mut classes = Self::default();
        for &b in token {
            match b {
                b'a'..=b'z' => classes.lower = true,
                b'A'..=b'Z' => classes.upper = true,
                b'0'..=b'9' => classes.digit = true,
                _ => classes.symbol = true,
            }
        }
        classes
    }

    /// Number of distinct classes present (0..=4).
    pub fn count(&self) -> usize {
        [self.lower, self.upper, self.digit, self.symbol]
            .iter()
            .filter(|present| **present)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entropy_of_empty_token_is_zero() {
        assert_eq!(shannon_entropy(b""), 0.0);
    }

    #[test]
    fn entropy_of_repeated_byte_is_zero() {
        assert_eq!(shannon_entropy(b"zzzzzzzz"), 0.0);
    }

    #[test]
    fn entropy_of_eight_distinct_bytes_is_three_bits() {
        let e = shannon_entropy(b"01234567");
        assert!((e - 3.0).abs() < 1e-10);
    }

    #[test]
    fn char_classes_are_counted() {
        assert_eq!(CharClasses::of(b"abc").count(), 1);
        assert_eq!(CharClasses::of(b"aB3").count(), 3);
        assert_eq!(CharClasses::of(b"aB3_").count(), 4);
        assert_eq!(CharClasses::of(b"").count(), 0);
    }
}
