// autoredact-entropy/src/context/mod.rs
use alloc::vec::Vec;
use core::fmt;
use daachorse::DoubleArrayAhoCorasick;

/// Keywords that usually label a credential in screenshots and documents.
const CREDENTIAL_KEYWORDS: &[&str] = &[
    "key", "api", "apikey", "token", "secret", "password", "passwd", "pwd",
    "auth", "bearer", "credential", "credentials", "private", "client",
    "aws", "gcp", "azure", "stripe", "session", "cookie",
];

/// Looks for a credential keyword shortly before a candidate token.
pub struct KeywordContext {
    automaton: Option<DoubleArrayAhoCorasick<usize>>,
}

impl fmt::Debug for KeywordContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeywordContext")
            .field("automaton", &self.automaton.as_ref().map(|_| "<DoubleArrayAhoCorasick>"))
            .finish()
    }
}

impl Default for KeywordContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordContext {
    pub fn new() -> Self {
        // Build failure means no context, never a panic.
        Self {
            automaton: DoubleArrayAhoCorasick::new(CREDENTIAL_KEYWORDS).ok(),
        }
    }

    /// Returns true when a keyword appears as a whole word within `window`
    /// bytes before `token_start`. Matching is ASCII case-insensitive, so
    /// `API_KEY:` and `api key` both count.
    pub fn has_keyword_before(&self, text: &[u8], token_start: usize, window: usize) -> bool {
        let Some(automaton) = self.automaton.as_ref() else {
            return false;
        };
        let token_start = token_start.min(text.len());
        if token_start == 0 {
            return false;
        }

        let start = token_start.saturating_sub(window);
        let lowered: Vec<u8> = text[start..token_start].to_ascii_lowercase();

        automaton.find_overlapping_iter(&lowered).any(|m| {
            let before_ok = m.start() == 0 || !lowered[m.start() - 1].is_ascii_alphabetic();
            let after_ok = m.end() == lowered.len() || !lowered[m.end()].is_ascii_alphabetic();
            before_ok && after_ok
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_keyword_with_separator() {
        let ctx = KeywordContext::new();
        let text = b"API_KEY: abcdef";
        assert!(ctx.has_keyword_before(text, 9, 32));
    }

    #[test]
    fn ignores_keyword_inside_larger_word() {
        let ctx = KeywordContext::new();
        let text = b"monkey abcdef";
        assert!(!ctx.has_keyword_before(text, 7, 32));
    }

    #[test]
    fn respects_window_and_start_of_text() {
        let ctx = KeywordContext::new();
        let text = b"token is far away from here xyz";
        assert!(!ctx.has_keyword_before(text, 28, 8));
        assert!(!ctx.has_keyword_before(text, 0, 32));
    }
}
