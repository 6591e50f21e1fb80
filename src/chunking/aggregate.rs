//! Multi-source aggregation.
//!
//! Runs a [`Chunker`] over several named sources and concatenates the
//! results in source order. Each source is chunked independently: chunk
//! indices restart at zero and overlap never crosses a source boundary.

use crate::chunking::paragraph::ParagraphChunker;
use crate::chunking::traits::{ChunkConfig, Chunker};
use crate::core::{Chunk, SourceDocument};
use crate::error::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A named body of text to be chunked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceText {
    /// Identifier stamped on every chunk of this source.
    pub source: String,

    /// Extracted text.
    pub text: String,
}

impl SourceText {
    /// Creates a source.
    #[must_use]
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }

    /// Returns true if the text is empty or whitespace-only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl From<&SourceDocument> for SourceText {
    fn from(doc: &SourceDocument) -> Self {
        Self::new(doc.source.clone(), doc.text.clone())
    }
}

impl From<SourceDocument> for SourceText {
    fn from(doc: SourceDocument) -> Self {
        Self::new(doc.source, doc.text)
    }
}

/// Chunks many sources with one chunker.
///
/// # Examples
///
/// ```
/// use studypack::chunking::{ParagraphChunker, SourceAggregator, SourceText};
///
/// let aggregator = SourceAggregator::new(ParagraphChunker::new());
/// let chunks = aggregator
///     .aggregate(&[
///         SourceText::new("a.pdf", "Alpha."),
///         SourceText::new("empty.txt", "   "),
///         SourceText::new("b.pdf", "Beta."),
///     ])
///     .unwrap();
///
/// let sources: Vec<&str> = chunks.iter().map(|c| c.source.as_str()).collect();
/// assert_eq!(sources, vec!["a.pdf", "b.pdf"]);
/// ```
#[derive(Debug, Clone)]
pub struct SourceAggregator<C: Chunker = ParagraphChunker> {
    chunker: C,
    parallel: bool,
}

impl Default for SourceAggregator {
    fn default() -> Self {
        Self::new(ParagraphChunker::new())
    }
}

impl<C: Chunker> SourceAggregator<C> {
    /// Creates a sequential aggregator around `chunker`.
    #[must_use]
    pub const fn new(chunker: C) -> Self {
        Self {
            chunker,
            parallel: false,
        }
    }

    /// Chunks sources on the rayon pool when enabled.
    ///
    /// Output order is the same either way.
    #[must_use]
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the wrapped chunker.
    #[must_use]
    pub const fn chunker(&self) -> &C {
        &self.chunker
    }

    /// Chunks every source and concatenates the results.
    ///
    /// Blank sources contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the chunker's configuration is invalid. The
    /// check runs before any source is looked at.
    pub fn aggregate(&self, sources: &[SourceText]) -> Result<Vec<Chunk>> {
        self.chunker.validate()?;

        let per_source: Vec<Vec<Chunk>> = if self.parallel {
            sources
                .par_iter()
                .map(|source| self.chunk_source(source))
                .collect::<Result<_>>()?
        } else {
            sources
                .iter()
                .map(|source| self.chunk_source(source))
                .collect::<Result<_>>()?
        };

        Ok(per_source.into_iter().flatten().collect())
    }

    fn chunk_source(&self, source: &SourceText) -> Result<Vec<Chunk>> {
        if source.is_blank() {
            tracing::debug!(source = %source.source, "skipping blank source");
            return Ok(vec![]);
        }

        let chunks = self.chunker.chunk(&source.source, &source.text)?;
        tracing::debug!(
            source = %source.source,
            chunker = self.chunker.name(),
            chunks = chunks.len(),
            "chunked source"
        );
        Ok(chunks)
    }
}

/// Chunks sources with the paragraph chunker and the given budgets.
///
/// # Errors
///
/// Returns an error if `config` is invalid.
pub fn chunk_sources(sources: &[SourceText], config: &ChunkConfig) -> Result<Vec<Chunk>> {
    SourceAggregator::new(ParagraphChunker::with_config(*config)).aggregate(sources)
}
