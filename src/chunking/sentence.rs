//! Sentence splitting.
//!
//! A deliberately simple splitter: a sentence ends at one of `.`, `!`
//! or `?` followed by at least one whitespace character. The break
//! (punctuation plus the whitespace run) is consumed, so every sentence
//! except the last loses its terminal punctuation.
//!
//! Abbreviations ("Dr. Smith"), numbers followed by whitespace after a
//! period, and punctuation inside quotes all split eagerly. Overlap
//! continuity downstream depends on exactly these boundaries, so they
//! are pinned by tests rather than refined.

use crate::error::Result;
use regex::Regex;
use std::sync::OnceLock;

/// Pattern matching a sentence break.
pub const SENTENCE_BREAK: &str = r"[.!?]\s+";

/// Punctuation-based sentence splitter.
///
/// # Examples
///
/// ```
/// use studypack::chunking::SentenceSplitter;
///
/// let splitter = SentenceSplitter::new().unwrap();
/// let sentences: Vec<&str> = splitter.split("One. Two!  Three?").collect();
/// assert_eq!(sentences, vec!["One", "Two", "Three?"]);
/// ```
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    pattern: Regex,
}

impl SentenceSplitter {
    /// Creates a splitter.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ChunkingError::Regex`] if the break pattern
    /// fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(SENTENCE_BREAK)?,
        })
    }

    /// Returns the process-wide splitter, compiling the pattern on first use.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ChunkingError::Regex`] if the break pattern
    /// fails to compile.
    pub fn shared() -> Result<&'static Self> {
        static SHARED: OnceLock<SentenceSplitter> = OnceLock::new();

        if let Some(splitter) = SHARED.get() {
            return Ok(splitter);
        }
        let splitter = Self::new()?;
        Ok(SHARED.get_or_init(|| splitter))
    }

    /// Splits `text` into trimmed, non-empty sentences.
    ///
    /// The iterator is lazy and yields slices of `text` in order. The
    /// slices borrow `text` only, not the splitter.
    pub fn split<'t>(&self, text: &'t str) -> impl Iterator<Item = &'t str> + use<'_, 't> {
        self.pattern
            .split(text)
            .map(str::trim)
            .filter(|sentence| !sentence.is_empty())
    }
}

/// Splits `text` into sentences with the shared splitter.
///
/// # Errors
///
/// Returns an error if the break pattern fails to compile.
pub fn split_sentences(text: &str) -> Result<Vec<&str>> {
    Ok(SentenceSplitter::shared()?.split(text).collect())
}
