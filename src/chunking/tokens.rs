//! Token estimation.
//!
//! Approximates the model-token cost of a text span without running a
//! tokenizer. The estimator is a trait so an exact tokenizer can be
//! substituted without touching the chunking control flow.

use std::num::NonZeroUsize;

/// Characters per token used by the default estimator.
pub const CHARS_PER_TOKEN: usize = 4;

/// Estimates the model-token cost of text.
///
/// Implementations must be pure: the same input always yields the same
/// estimate.
pub trait TokenEstimator: Send + Sync {
    /// Returns the estimated token cost of `text`.
    fn estimate(&self, text: &str) -> usize;

    /// Returns the estimated cost of `head + separator + tail`.
    ///
    /// The default builds the joined string. Implementations that can
    /// answer without allocating should override this.
    fn estimate_joined(&self, head: &str, separator: &str, tail: &str) -> usize {
        let mut joined = String::with_capacity(head.len() + separator.len() + tail.len());
        joined.push_str(head);
        joined.push_str(separator);
        joined.push_str(tail);
        self.estimate(&joined)
    }

    /// Returns the number of characters that corresponds to `tokens`.
    ///
    /// Used to turn token budgets into character budgets (e.g. overlap).
    fn chars_for_tokens(&self, tokens: usize) -> usize {
        tokens.saturating_mul(CHARS_PER_TOKEN)
    }
}

/// Fixed-ratio estimator: `floor(chars / ratio)`.
///
/// Counts Unicode scalar values, not bytes.
///
/// # Examples
///
/// ```
/// use studypack::chunking::{CharRatioEstimator, TokenEstimator};
///
/// let estimator = CharRatioEstimator::new();
/// assert_eq!(estimator.estimate(""), 0);
/// assert_eq!(estimator.estimate("abcdefg"), 1);
/// assert_eq!(estimator.estimate("abcdefgh"), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharRatioEstimator {
    chars_per_token: NonZeroUsize,
}

impl Default for CharRatioEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl CharRatioEstimator {
    /// Creates an estimator with the default ratio of 4 characters per token.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            chars_per_token: NonZeroUsize::MIN.saturating_add(CHARS_PER_TOKEN - 1),
        }
    }

    /// Creates an estimator with a custom ratio.
    #[must_use]
    pub const fn with_ratio(chars_per_token: NonZeroUsize) -> Self {
        Self { chars_per_token }
    }

    /// Returns the configured ratio.
    #[must_use]
    pub const fn chars_per_token(&self) -> usize {
        self.chars_per_token.get()
    }

    const fn tokens_for_chars(&self, chars: usize) -> usize {
        chars / self.chars_per_token.get()
    }
}

impl TokenEstimator for CharRatioEstimator {
    fn estimate(&self, text: &str) -> usize {
        self.tokens_for_chars(text.chars().count())
    }

    fn estimate_joined(&self, head: &str, separator: &str, tail: &str) -> usize {
        let chars = head.chars().count() + separator.chars().count() + tail.chars().count();
        self.tokens_for_chars(chars)
    }

    fn chars_for_tokens(&self, tokens: usize) -> usize {
        tokens.saturating_mul(self.chars_per_token.get())
    }
}

/// Estimates tokens with the default 4-characters-per-token ratio.
///
/// # Examples
///
/// ```
/// use studypack::chunking::estimate_tokens;
///
/// assert_eq!(estimate_tokens("Hello, world!"), 3);
/// ```
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    CharRatioEstimator::new().estimate(text)
}
