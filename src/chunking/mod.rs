//! Chunking of extracted text into token-bounded segments.
//!
//! The pipeline per source is: paragraphs (blank-line separated) are
//! packed greedily up to a token budget; a paragraph too large on its own
//! is packed sentence by sentence instead; each new chunk is seeded with
//! a sentence-aligned tail of the previous one.
//!
//! - [`TokenEstimator`] / [`CharRatioEstimator`]: character-ratio token estimate
//! - [`SentenceSplitter`]: punctuation-based sentence breaks
//! - [`ParagraphChunker`]: the chunk builder
//! - [`SourceAggregator`]: ordered chunking across many sources

pub mod aggregate;
pub mod overlap;
pub mod paragraph;
pub mod sentence;
pub mod tokens;
pub mod traits;

pub use aggregate::{SourceAggregator, SourceText, chunk_sources};
pub use overlap::overlap_tail;
pub use paragraph::{ParagraphChunker, chunk_text};
pub use sentence::{SentenceSplitter, split_sentences};
pub use tokens::{CHARS_PER_TOKEN, CharRatioEstimator, TokenEstimator, estimate_tokens};
pub use traits::{ChunkConfig, Chunker};

/// Default chunk budget in estimated tokens.
pub const DEFAULT_MAX_TOKENS: usize = 1000;

/// Default overlap budget in estimated tokens.
pub const DEFAULT_OVERLAP_TOKENS: usize = 100;

/// Creates the default chunker.
#[must_use]
pub fn default_chunker() -> ParagraphChunker {
    ParagraphChunker::new()
}
