//! Paragraph-first chunking with sentence fallback.
//!
//! Text is split into paragraphs on blank lines and packed greedily into
//! chunks bounded by a token budget. A paragraph that alone exceeds the
//! budget is broken into sentences and packed sentence by sentence.
//! Whenever a chunk closes, the next one is seeded with a tail of the
//! closed chunk (see [`overlap_tail`]) for context continuity.
//!
//! Units are never cut: a single oversized paragraph or sentence, or an
//! overlap seed plus the unit that follows it, may push one chunk over
//! the budget.

use crate::chunking::overlap::overlap_tail;
use crate::chunking::sentence::SentenceSplitter;
use crate::chunking::tokens::{CharRatioEstimator, TokenEstimator};
use crate::chunking::traits::{ChunkConfig, Chunker};
use crate::core::Chunk;
use crate::error::Result;

/// Separator between paragraphs inside a chunk.
const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Separator between sentences packed from an oversized paragraph.
const SENTENCE_SEPARATOR: &str = " ";

/// Paragraph-first chunker.
///
/// # Examples
///
/// ```
/// use studypack::chunking::{ChunkConfig, Chunker, ParagraphChunker};
///
/// let chunker = ParagraphChunker::with_config(ChunkConfig::new(1000, 100));
/// let chunks = chunker
///     .chunk("doc.txt", "Paragraph one text.\n\nParagraph two text.")
///     .unwrap();
/// assert_eq!(chunks.len(), 1);
/// assert_eq!(chunks[0].text, "Paragraph one text.\n\nParagraph two text.");
/// ```
#[derive(Debug, Clone)]
pub struct ParagraphChunker<E: TokenEstimator = CharRatioEstimator> {
    config: ChunkConfig,
    estimator: E,
}

impl Default for ParagraphChunker {
    fn default() -> Self {
        Self::new()
    }
}

impl ParagraphChunker {
    /// Creates a chunker with the default budgets (1000 / 100 tokens).
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ChunkConfig::default())
    }

    /// Creates a chunker with custom budgets.
    #[must_use]
    pub const fn with_config(config: ChunkConfig) -> Self {
        Self {
            config,
            estimator: CharRatioEstimator::new(),
        }
    }
}

impl<E: TokenEstimator> ParagraphChunker<E> {
    /// Creates a chunker with a custom token estimator.
    #[must_use]
    pub const fn with_estimator(config: ChunkConfig, estimator: E) -> Self {
        Self { config, estimator }
    }

    /// Returns the configured budgets.
    #[must_use]
    pub const fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Returns the token estimator.
    #[must_use]
    pub const fn estimator(&self) -> &E {
        &self.estimator
    }
}

impl<E: TokenEstimator> Chunker for ParagraphChunker<E> {
    fn chunk(&self, source: &str, text: &str) -> Result<Vec<Chunk>> {
        self.validate()?;

        if text.trim().is_empty() {
            return Ok(vec![]);
        }

        let max_tokens = self.config.max_tokens;
        let mut builder = ChunkBuilder {
            source,
            estimator: &self.estimator,
            overlap_chars: self.estimator.chars_for_tokens(self.config.overlap_tokens),
            buffer: String::new(),
            chunks: Vec::new(),
        };

        for paragraph in paragraphs(text) {
            let paragraph_tokens = self.estimator.estimate(paragraph);

            if paragraph_tokens > max_tokens {
                tracing::debug!(
                    source,
                    paragraph_tokens,
                    max_tokens,
                    "paragraph over budget, packing by sentence"
                );
                for sentence in SentenceSplitter::shared()?.split(paragraph) {
                    if builder.exceeds(SENTENCE_SEPARATOR, sentence, max_tokens)
                        && !builder.buffer.is_empty()
                    {
                        builder.close_and_seed(SENTENCE_SEPARATOR, sentence);
                    } else {
                        builder.buffer.push_str(SENTENCE_SEPARATOR);
                        builder.buffer.push_str(sentence);
                    }
                }
            } else if builder.exceeds(PARAGRAPH_SEPARATOR, paragraph, max_tokens)
                && !builder.buffer.is_empty()
            {
                builder.close_and_seed(PARAGRAPH_SEPARATOR, paragraph);
            } else {
                if !builder.buffer.is_empty() {
                    builder.buffer.push_str(PARAGRAPH_SEPARATOR);
                }
                builder.buffer.push_str(paragraph);
            }
        }

        let chunks = builder.finish();
        tracing::trace!(source, chunks = chunks.len(), "chunked source");
        Ok(chunks)
    }

    fn name(&self) -> &'static str {
        "paragraph"
    }

    fn description(&self) -> &'static str {
        "Paragraph-first chunking with sentence fallback and sentence-aligned overlap"
    }

    fn validate(&self) -> Result<()> {
        self.config.validate()
    }
}

/// Running state for one source.
struct ChunkBuilder<'a, E: TokenEstimator> {
    source: &'a str,
    estimator: &'a E,
    overlap_chars: usize,
    buffer: String,
    chunks: Vec<Chunk>,
}

impl<E: TokenEstimator> ChunkBuilder<'_, E> {
    /// Whether appending `unit` after `separator` would exceed the budget.
    fn exceeds(&self, separator: &str, unit: &str, max_tokens: usize) -> bool {
        self.estimator.estimate_joined(&self.buffer, separator, unit) > max_tokens
    }

    /// Closes the current chunk and starts the next with its overlap tail.
    fn close_and_seed(&mut self, separator: &str, unit: &str) {
        let overlap = overlap_tail(&self.buffer, self.overlap_chars).to_string();
        self.emit();

        self.buffer = overlap;
        if !self.buffer.is_empty() {
            self.buffer.push_str(separator);
        }
        self.buffer.push_str(unit);
    }

    /// Emits the buffer as a chunk if it holds any content.
    fn emit(&mut self) {
        let text = self.buffer.trim();
        if text.is_empty() {
            return;
        }
        let token_estimate = self.estimator.estimate(text);
        self.chunks.push(Chunk::new(
            self.source,
            self.chunks.len(),
            text.to_string(),
            token_estimate,
        ));
    }

    fn finish(mut self) -> Vec<Chunk> {
        self.emit();
        self.chunks
    }
}

/// Splits text on blank lines, dropping empty paragraphs.
fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.split(PARAGRAPH_SEPARATOR)
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
}

/// Chunks a single source with the default estimator.
///
/// # Errors
///
/// Returns an error if `config` is invalid.
///
/// # Examples
///
/// ```
/// use studypack::chunking::{ChunkConfig, chunk_text};
///
/// let chunks = chunk_text("   \n\n  ", "empty.txt", &ChunkConfig::default()).unwrap();
/// assert!(chunks.is_empty());
/// ```
pub fn chunk_text(text: &str, source: &str, config: &ChunkConfig) -> Result<Vec<Chunk>> {
    ParagraphChunker::with_config(*config).chunk(source, text)
}
