// autoredact-entropy/src/scoring/mod.rs
use crate::context::KeywordContext;
use crate::entropy::{shannon_entropy, CharClasses};
use crate::EntropyScore;

/// How far back (in bytes) a credential keyword may sit before a token.
const CONTEXT_WINDOW: usize = 32;

/// Outcome of grading a single candidate token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenVerdict {
    pub entropy: EntropyScore,
    pub classes: usize,
    pub has_context: bool,
    pub is_secret: bool,
}

/// Grades candidate tokens as likely secrets.
///
/// A token qualifies when it is long enough and random enough. Tokens mixing
/// at least three character classes need `entropy_threshold`; tokens with a
/// credential keyword in front need only two classes and get a
/// `context_discount` off the threshold.
#[derive(Debug)]
pub struct SecretScorer {
    pub min_length: usize,
    pub entropy_threshold: EntropyScore,
    pub context_discount: EntropyScore,
    context: KeywordContext,
}

impl Default for SecretScorer {
    fn default() -> Self {
        Self::new(20, 3.5)
    }
}

impl SecretScorer {
    pub fn new(min_length: usize, entropy_threshold: EntropyScore) -> Self {
        Self {
            min_length,
            entropy_threshold,
            context_discount: 0.5,
            context: KeywordContext::new(),
        }
    }

    /// Scores `text[start..end]`, looking at the bytes before `start` for context.
    pub fn evaluate(&self, text: &[u8], start: usize, end: usize) -> TokenVerdict {
        let token = &text[start..end];
        let entropy = shannon_entropy(token);
        let classes = CharClasses::of(token).count();
        let has_context = self.context.has_keyword_before(text, start, CONTEXT_WINDOW);

        let is_secret = if token.len() < self.min_length {
            false
        } else if has_context {
            classes >= 2 && entropy >= self.entropy_threshold - self.context_discount
        } else {
            classes >= 3 && entropy >= self.entropy_threshold
        };

        TokenVerdict { entropy, classes, has_context, is_secret }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_random_token_is_secret_without_context() {
        let scorer = SecretScorer::default();
        let text = b"see Zx8Kq2Lm9Vb4Nw7Rt1Yp3Hs6";
        let verdict = scorer.evaluate(text, 4, text.len());
        assert!(verdict.is_secret, "{:?}", verdict);
        assert!(!verdict.has_context);
    }

    #[test]
    fn hex_token_needs_keyword_context() {
        let scorer = SecretScorer::default();
        let bare = b"digest 7f8a9b2c3d4e5f6a7b8c9d0e1f2a3b4c";
        assert!(!scorer.evaluate(bare, 7, bare.len()).is_secret);

        let labelled = b"AUTH_TOKEN=7f8a9b2c3d4e5f6a7b8c9d0e1f2a3b4c";
        let verdict = scorer.evaluate(labelled, 11, labelled.len());
        assert!(verdict.has_context);
        assert!(verdict.is_secret, "{:?}", verdict);
    }

    #[test]
    fn long_plain_word_is_not_secret() {
        let scorer = SecretScorer::default();
        let text = b"internationalizations";
        assert!(!scorer.evaluate(text, 0, text.len()).is_secret);
    }

    #[test]
    fn short_token_is_never_secret() {
        let scorer = SecretScorer::default();
        let text = b"password: Ab3$";
        assert!(!scorer.evaluate(text, 10, text.len()).is_secret);
    }
}
